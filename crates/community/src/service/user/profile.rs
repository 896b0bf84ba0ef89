use crate::{
    abstract_trait::user::{DynUserCommandRepository, DynUserQueryRepository, ProfileServiceTrait},
    domain::{
        requests::{ChangePasswordRequest, UpdateProfileRequest, validate_request},
        response::UserResponse,
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;
use uuid::Uuid;

pub struct ProfileServiceDeps {
    pub hash: DynHashing,
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

#[derive(Clone)]
pub struct ProfileService {
    hash: DynHashing,
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    metrics: Metrics,
}

impl ProfileService {
    pub fn new(deps: ProfileServiceDeps, registry: &mut Registry) -> Self {
        let ProfileServiceDeps {
            hash,
            query,
            command,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "profile_service");

        Self {
            hash,
            query,
            command,
            metrics,
        }
    }
}

#[async_trait]
impl ProfileServiceTrait for ProfileService {
    async fn update_profile(
        &self,
        user_id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("✏️ Updating profile for user {user_id}");

        let method = Method::Put;
        let tracing_ctx = TracingContext::start("profile", "UpdateProfile");

        if let Err(err) = validate_request(req) {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid profile update");
            return Err(err);
        }

        match self.command.update_profile(user_id, req).await {
            Ok(user) => {
                tracing_ctx.complete_success(&self.metrics, method, "Profile updated");
                Ok(ApiResponse::success(
                    "Profile updated successfully",
                    UserResponse::from(user),
                ))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to update profile");
                Err(e.into())
            }
        }
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        req: &ChangePasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        info!("🔑 Changing password for user {user_id}");

        let method = Method::Put;
        let tracing_ctx = TracingContext::start("profile", "ChangePassword");

        if let Err(err) = validate_request(req) {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid password change");
            return Err(err);
        }

        let user = match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, method, "User not found");
                return Err(ServiceError::Repo(RepositoryError::NotFound));
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to look up user");
                return Err(e.into());
            }
        };

        if let Err(e) = self
            .hash
            .compare_password(&user.password, &req.current_password)
            .await
        {
            tracing_ctx.complete_error(&self.metrics, method, "Current password mismatch");
            return Err(e);
        }

        let hashed = match self.hash.hash_password(&req.new_password).await {
            Ok(hashed) => hashed,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to hash password");
                return Err(e);
            }
        };

        if let Err(e) = self.command.update_password(user_id, &hashed).await {
            tracing_ctx.complete_error(&self.metrics, method, "Failed to store password");
            return Err(e.into());
        }

        tracing_ctx.complete_success(&self.metrics, method, "Password changed");

        Ok(ApiResponse::success("Password changed successfully", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
        domain::requests::CreateUserRecord,
        repository::{MemoryStore, UserRepository},
    };
    use shared::{abstract_trait::HashingTrait, utils::Status};
    use std::sync::Arc;

    struct BrokenHasher;

    #[async_trait]
    impl HashingTrait for BrokenHasher {
        async fn hash_password(&self, _: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Internal("hasher unavailable".into()))
        }

        async fn compare_password(&self, _: &str, _: &str) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn change() -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: "builder-pass".into(),
            new_password: "fresh-builder-pass".into(),
            confirm_password: "fresh-builder-pass".into(),
        }
    }

    #[tokio::test]
    async fn hashing_failure_is_recorded_as_error() {
        let users = UserRepository::new(Arc::new(MemoryStore::default()));
        let user = users
            .command
            .create_user(&CreateUserRecord {
                name: "Ada".into(),
                email: "ada@uni.edu".into(),
                password: "hashed".into(),
                age: None,
                gender: None,
                department: None,
                education: None,
                social_links: Default::default(),
            })
            .await
            .unwrap();

        let service = ProfileService::new(
            ProfileServiceDeps {
                hash: Arc::new(BrokenHasher),
                query: users.query.clone(),
                command: users.command,
            },
            &mut Registry::default(),
        );

        let err = service.change_password(user.id, &change()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(service.metrics.count(Method::Put, Status::Error), 1);

        let stored = users.query.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password, "hashed");
    }
}
