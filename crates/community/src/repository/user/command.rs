use crate::{
    abstract_trait::user::UserCommandRepositoryTrait,
    domain::requests::{CreateUserRecord, UpdateProfileRequest},
    model::{User as UserModel, UserStatus},
    repository::{MemoryStore, store::normalize_email},
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserCommandRepository {
    db: Arc<MemoryStore>,
}

impl UserCommandRepository {
    pub fn new(db: Arc<MemoryStore>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        self.db.simulate_latency().await;

        let email = normalize_email(&req.email);
        let mut users = self.db.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(RepositoryError::AlreadyExists(
                "Email already registered".into(),
            ));
        }

        let now = Utc::now();
        let user = UserModel {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            email,
            password: req.password.clone(),
            age: req.age,
            gender: req.gender,
            department: req.department.clone(),
            education: req.education.clone(),
            social_links: req.social_links.clone(),
            status: UserStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError> {
        self.db.simulate_latency().await;

        let mut users = self.db.users.write().await;

        let new_email = req.email.as_deref().map(normalize_email);

        if let Some(email) = &new_email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(RepositoryError::AlreadyExists(
                    "Email already registered".into(),
                ));
            }
        }

        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = new_email {
            user.email = email;
        }
        if req.age.is_some() {
            user.age = req.age;
        }
        if req.gender.is_some() {
            user.gender = req.gender;
        }
        if req.department.is_some() {
            user.department = req.department.clone();
        }
        if req.education.is_some() {
            user.education = req.education.clone();
        }
        if let Some(links) = &req.social_links {
            user.social_links = links.clone();
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<UserModel, RepositoryError> {
        self.db.simulate_latency().await;

        let mut users = self.db.users.write().await;
        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        user.status = status;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password: &str,
    ) -> Result<UserModel, RepositoryError> {
        self.db.simulate_latency().await;

        let mut users = self.db.users.write().await;
        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        user.password = password.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.db.simulate_latency().await;

        self.db
            .users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
