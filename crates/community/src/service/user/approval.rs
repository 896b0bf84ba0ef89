use crate::{
    abstract_trait::user::{ApprovalServiceTrait, DynUserCommandRepository, DynUserQueryRepository},
    domain::response::UserResponse,
    model::UserStatus,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;
use uuid::Uuid;

pub struct ApprovalServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

/// Admin decisions on signup requests and member accounts.
///
/// Approve and reject overwrite whatever status the user has; only
/// reinstatement requires a suspended account.
#[derive(Clone)]
pub struct ApprovalService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    metrics: Metrics,
}

impl ApprovalService {
    pub fn new(deps: ApprovalServiceDeps, registry: &mut Registry) -> Self {
        let ApprovalServiceDeps { query, command } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "approval_service");

        Self {
            query,
            command,
            metrics,
        }
    }

    async fn transition(
        &self,
        operation: &str,
        id: Uuid,
        status: UserStatus,
        message: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🛂 {operation} | User: {id} -> {status}");

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("admin", operation);

        match self.command.update_status(id, status).await {
            Ok(user) => {
                tracing_ctx.complete_success(&self.metrics, method, message);
                Ok(ApiResponse::success(message, UserResponse::from(user)))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, &format!("{operation} failed"));
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl ApprovalServiceTrait for ApprovalService {
    async fn approve_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.transition("ApproveUser", id, UserStatus::Approved, "User approved")
            .await
    }

    async fn reject_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.transition("RejectUser", id, UserStatus::Rejected, "User rejected")
            .await
    }

    async fn suspend_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.transition("SuspendUser", id, UserStatus::Suspended, "User suspended")
            .await
    }

    async fn reinstate_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .query
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        if user.status != UserStatus::Suspended {
            return Err(ServiceError::Repo(RepositoryError::Conflict(format!(
                "Only suspended users can be reinstated (current status: {})",
                user.status
            ))));
        }

        self.transition("ReinstateUser", id, UserStatus::Approved, "User reinstated")
            .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<ApiResponse<bool>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = TracingContext::start("admin", "DeleteUser");

        match self.command.delete_user(id).await {
            Ok(()) => {
                tracing_ctx.complete_success(&self.metrics, method, "User deleted");
                Ok(ApiResponse::success("User deleted", true))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to delete user");
                Err(e.into())
            }
        }
    }
}
