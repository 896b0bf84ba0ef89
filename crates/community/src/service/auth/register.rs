use crate::{
    abstract_trait::{auth::RegisterServiceTrait, user::DynUserCommandRepository},
    domain::{
        requests::{CreateUserRecord, SignupRequest, validate_request},
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

pub struct RegisterServiceDeps {
    pub hash: DynHashing,
    pub command: DynUserCommandRepository,
}

#[derive(Clone)]
pub struct RegisterService {
    hash: DynHashing,
    command: DynUserCommandRepository,
    metrics: Metrics,
}

impl RegisterService {
    pub fn new(deps: RegisterServiceDeps, registry: &mut Registry) -> Self {
        let RegisterServiceDeps { hash, command } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "register_service");

        Self {
            hash,
            command,
            metrics,
        }
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn signup(&self, req: &SignupRequest) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 [SIGNUP] Starting signup request | Email: {}", req.email);

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "Signup");

        if let Err(err) = validate_request(req) {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid signup request");
            return Err(err);
        }

        let hashed = match self.hash.hash_password(&req.password).await {
            Ok(h) => h,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to hash password");
                return Err(e);
            }
        };

        let record = CreateUserRecord {
            name: req.name.clone(),
            email: req.email.clone(),
            password: hashed,
            age: req.age,
            gender: req.gender,
            department: req.department.clone(),
            education: req.education.clone(),
            social_links: req.social_links.clone(),
        };

        let user = match self.command.create_user(&record).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(msg)) => {
                tracing_ctx.complete_error(&self.metrics, method, "Email already exists");
                return Err(ServiceError::Repo(RepositoryError::AlreadyExists(msg)));
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to store signup");
                return Err(e.into());
            }
        };

        tracing_ctx.complete_success(&self.metrics, method, "Signup request stored");

        Ok(ApiResponse::success(
            "Signup request submitted, awaiting admin approval",
            UserResponse::from(user),
        ))
    }
}
