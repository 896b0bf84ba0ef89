use crate::model::Admin as AdminModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynAdminRepository = Arc<dyn AdminRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AdminRepositoryTrait {
    /// Inserts the admin unless one with the same email already exists.
    async fn seed(&self, admin: AdminModel) -> Result<AdminModel, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminModel>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminModel>, RepositoryError>;
}
