use crate::{
    abstract_trait::admin::AdminRepositoryTrait,
    model::Admin as AdminModel,
    repository::{MemoryStore, store::normalize_email},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub struct AdminRepository {
    db: Arc<MemoryStore>,
}

impl AdminRepository {
    pub fn new(db: Arc<MemoryStore>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    async fn seed(&self, admin: AdminModel) -> Result<AdminModel, RepositoryError> {
        let email = normalize_email(&admin.email);
        let mut admins = self.db.admins.write().await;

        if let Some(existing) = admins.values().find(|a| a.email == email) {
            return Ok(existing.clone());
        }

        let admin = AdminModel { email, ..admin };
        admins.insert(admin.id, admin.clone());

        Ok(admin)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminModel>, RepositoryError> {
        self.db.simulate_latency().await;

        let email = normalize_email(email);

        Ok(self
            .db
            .admins
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminModel>, RepositoryError> {
        self.db.simulate_latency().await;

        Ok(self.db.admins.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn admin(email: &str) -> AdminModel {
        AdminModel {
            id: Uuid::new_v4(),
            email: email.into(),
            name: "Root".into(),
            password: "hashed".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn seeding_twice_keeps_the_first_admin() {
        let repo = AdminRepository::new(Arc::new(MemoryStore::default()));

        let first = repo.seed(admin("Admin@BuildersArc.dev")).await.unwrap();
        let second = repo.seed(admin("admin@buildersarc.dev")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.email, "admin@buildersarc.dev");
        assert!(
            repo.find_by_email("ADMIN@buildersarc.dev")
                .await
                .unwrap()
                .is_some()
        );
    }
}
