use crate::{
    abstract_trait::{
        admin::DynAdminRepository, auth::LoginServiceTrait, user::DynUserQueryRepository,
    },
    cache::CacheStore,
    domain::{
        requests::{LoginRequest, validate_request},
        response::TokenResponse,
    },
    model::{Role, UserStatus},
    repository::normalize_email,
    service::auth::TokenService,
};
use async_trait::async_trait;
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tracing::{info, warn};

pub const MAX_LOGIN_ATTEMPTS: i64 = 5;

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub admins: DynAdminRepository,
    pub token_service: TokenService,
    pub cache_store: Arc<CacheStore>,
}

#[derive(Clone)]
pub struct LoginService {
    hash: DynHashing,
    user_query: DynUserQueryRepository,
    admins: DynAdminRepository,
    token_service: TokenService,
    cache_store: Arc<CacheStore>,
    metrics: Metrics,
}

impl LoginService {
    pub fn new(deps: LoginServiceDeps, registry: &mut Registry) -> Self {
        let LoginServiceDeps {
            hash,
            user_query,
            admins,
            token_service,
            cache_store,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "login_service");

        Self {
            hash,
            user_query,
            admins,
            token_service,
            cache_store,
            metrics,
        }
    }

    /// Claims one login attempt for `key` before the password is checked.
    /// Claiming and counting are a single step, so parallel requests cannot
    /// slip past the limit while earlier ones are still verifying.
    async fn reserve_attempt(&self, key: &str) -> Result<(), ServiceError> {
        match self
            .cache_store
            .increment_within(key, MAX_LOGIN_ATTEMPTS, Duration::minutes(15))
            .await
        {
            Some(_) => Ok(()),
            None => Err(ServiceError::TooManyRequests(
                "Too many failed attempts. Try again later.".into(),
            )),
        }
    }

    /// Checks credentials against an optional stored hash. Unknown accounts
    /// and wrong passwords fail the same way. A failed check keeps the
    /// reserved attempt; a successful one resets the counter.
    async fn verify(
        &self,
        key: &str,
        stored_hash: Option<&str>,
        password: &str,
    ) -> Result<(), ServiceError> {
        let verified = match stored_hash {
            Some(hash) => self.hash.compare_password(hash, password).await,
            None => Err(ServiceError::InvalidCredentials),
        };

        if verified.is_ok() {
            self.cache_store.delete_from_cache(key).await;
        }

        verified
    }
}

fn status_gate(status: UserStatus) -> Result<(), ServiceError> {
    match status {
        UserStatus::Approved => Ok(()),
        UserStatus::Pending => Err(ServiceError::Forbidden(
            "Your account is pending admin approval".into(),
        )),
        UserStatus::Rejected => Err(ServiceError::Forbidden(
            "Your signup request was rejected".into(),
        )),
        UserStatus::Suspended => Err(ServiceError::Forbidden(
            "Your account has been suspended".into(),
        )),
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let email = normalize_email(&req.email);

        info!("🔐 Attempting login for email: {email}");

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "Login");

        if let Err(err) = validate_request(req) {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid login request");
            return Err(err);
        }

        let attempts_key = format!("auth:login_attempts:{email}");
        if let Err(e) = self.reserve_attempt(&attempts_key).await {
            tracing_ctx.complete_error(
                &self.metrics,
                method,
                "Too many failed login attempts (rate limited)",
            );
            return Err(e);
        }

        let user = match self.user_query.find_by_email(&email).await {
            Ok(user) => user,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to look up user");
                return Err(e.into());
            }
        };

        if let Err(e) = self
            .verify(
                &attempts_key,
                user.as_ref().map(|u| u.password.as_str()),
                &req.password,
            )
            .await
        {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid credentials");
            return Err(e);
        }

        let Some(user) = user else {
            return Err(ServiceError::InvalidCredentials);
        };

        if let Err(e) = status_gate(user.status) {
            warn!("Login refused for {email}: status {}", user.status);
            tracing_ctx.complete_error(&self.metrics, method, "Account not approved");
            return Err(e);
        }

        let tokens = match self.token_service.issue(&user.id.to_string(), Role::User) {
            Ok(t) => t,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to generate tokens");
                return Err(e);
            }
        };

        tracing_ctx.complete_success(&self.metrics, method, "Login successful");

        Ok(ApiResponse::success("Login successful", tokens))
    }

    async fn admin_login(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let email = normalize_email(&req.email);

        info!("🔐 Attempting admin login for email: {email}");

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "AdminLogin");

        if let Err(err) = validate_request(req) {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid login request");
            return Err(err);
        }

        let attempts_key = format!("auth:admin_login_attempts:{email}");
        if let Err(e) = self.reserve_attempt(&attempts_key).await {
            tracing_ctx.complete_error(
                &self.metrics,
                method,
                "Too many failed admin login attempts (rate limited)",
            );
            return Err(e);
        }

        let admin = match self.admins.find_by_email(&email).await {
            Ok(admin) => admin,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to look up admin");
                return Err(e.into());
            }
        };

        if let Err(e) = self
            .verify(
                &attempts_key,
                admin.as_ref().map(|a| a.password.as_str()),
                &req.password,
            )
            .await
        {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid admin credentials");
            return Err(e);
        }

        let Some(admin) = admin else {
            return Err(ServiceError::InvalidCredentials);
        };

        let tokens = match self.token_service.issue(&admin.id.to_string(), Role::Admin) {
            Ok(t) => t,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to generate tokens");
                return Err(e);
            }
        };

        tracing_ctx.complete_success(&self.metrics, method, "Admin login successful");

        Ok(ApiResponse::success("Admin login successful", tokens))
    }
}
