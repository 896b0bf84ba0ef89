use crate::{
    abstract_trait::{
        admin::DynAdminRepository, auth::IdentityServiceTrait, user::DynUserQueryRepository,
    },
    domain::response::{AdminResponse, ProfileResponse, TokenResponse, UserResponse},
    model::{Role, UserStatus},
    service::auth::TokenService,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::Claims,
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;
use uuid::Uuid;

pub struct IdentityServiceDeps {
    pub jwt: DynJwtService,
    pub token_service: TokenService,
    pub user_query: DynUserQueryRepository,
    pub admins: DynAdminRepository,
}

#[derive(Clone)]
pub struct IdentityService {
    jwt: DynJwtService,
    token_service: TokenService,
    user_query: DynUserQueryRepository,
    admins: DynAdminRepository,
    metrics: Metrics,
}

impl IdentityService {
    pub fn new(deps: IdentityServiceDeps, registry: &mut Registry) -> Self {
        let IdentityServiceDeps {
            jwt,
            token_service,
            user_query,
            admins,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "identity_service");

        Self {
            jwt,
            token_service,
            user_query,
            admins,
            metrics,
        }
    }

    async fn resolve(&self, claims: &Claims) -> Result<ProfileResponse, ServiceError> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| ServiceError::InvalidTokenType)?;

        match Role::from_claim(&claims.role) {
            Some(Role::Admin) => self
                .admins
                .find_by_id(id)
                .await?
                .map(|a| ProfileResponse::Admin(AdminResponse::from(a)))
                .ok_or(ServiceError::Repo(RepositoryError::NotFound)),
            Some(Role::User) => self
                .user_query
                .find_by_id(id)
                .await?
                .map(|u| ProfileResponse::User(UserResponse::from(u)))
                .ok_or(ServiceError::Repo(RepositoryError::NotFound)),
            None => Err(ServiceError::InvalidTokenType),
        }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, claims: &Claims) -> Result<ApiResponse<ProfileResponse>, ServiceError> {
        info!("👤 Fetching profile for {} ({})", claims.sub, claims.role);

        let method = Method::Get;
        let tracing_ctx = TracingContext::start("auth", "GetMe");

        match self.resolve(claims).await {
            Ok(profile) => {
                tracing_ctx.complete_success(&self.metrics, method, "Profile fetched");
                Ok(ApiResponse::success("Profile fetched", profile))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to fetch profile");
                Err(e)
            }
        }
    }

    async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "RefreshToken");

        let claims = match self.jwt.verify_token(refresh_token, "refresh") {
            Ok(c) => c,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Invalid refresh token");
                return Err(e);
            }
        };

        let role = match self.resolve(&claims).await {
            Ok(ProfileResponse::User(user)) if user.status != UserStatus::Approved => {
                tracing_ctx.complete_error(&self.metrics, method, "Account no longer approved");
                return Err(ServiceError::Forbidden(format!(
                    "Account is {}",
                    user.status
                )));
            }
            Ok(ProfileResponse::User(_)) => Role::User,
            Ok(ProfileResponse::Admin(_)) => Role::Admin,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Unknown token subject");
                return Err(e);
            }
        };

        let tokens = self.token_service.issue(&claims.sub, role)?;

        tracing_ctx.complete_success(&self.metrics, method, "Token refreshed");

        Ok(ApiResponse::success("Token refreshed", tokens))
    }
}
