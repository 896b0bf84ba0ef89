use crate::{
    domain::{
        requests::{ApproveUserRequest, ApproveWithCredentialsRequest},
        response::ApprovalResponse,
    },
    errors::ApprovalError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynApprovalService = Arc<dyn ApprovalServiceTrait + Send + Sync>;

#[async_trait]
pub trait ApprovalServiceTrait {
    async fn approve_user(
        &self,
        req: &ApproveUserRequest,
    ) -> Result<ApprovalResponse, ApprovalError>;
    async fn approve_with_credentials(
        &self,
        req: &ApproveWithCredentialsRequest,
    ) -> Result<ApprovalResponse, ApprovalError>;
}
