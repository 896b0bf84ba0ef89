use crate::{
    domain::requests::{CreateUserRecord, FindAllUsers, UpdateProfileRequest},
    model::{User as UserModel, UserStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    /// Filtered page, newest first, plus the total number of matches.
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
    async fn count_by_status(&self) -> Result<HashMap<UserStatus, i64>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError>;
    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_password(&self, id: Uuid, password: &str)
    -> Result<UserModel, RepositoryError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError>;
}
