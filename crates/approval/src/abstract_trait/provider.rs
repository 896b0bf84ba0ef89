use crate::{
    domain::{
        requests::NewAuthUser,
        response::{CreatedAuthUser, SignupRecord},
    },
    errors::ApprovalError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthProvider = Arc<dyn AuthProviderTrait + Send + Sync>;

/// The hosted auth provider: its REST table of signup requests and its
/// admin user API.
#[async_trait]
pub trait AuthProviderTrait {
    async fn find_signup_request(
        &self,
        request_id: &str,
    ) -> Result<Option<SignupRecord>, ApprovalError>;
    async fn create_user(&self, user: &NewAuthUser) -> Result<CreatedAuthUser, ApprovalError>;
    async fn mark_signup_approved(&self, request_id: &str) -> Result<(), ApprovalError>;
}
