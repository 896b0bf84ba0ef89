use crate::{
    abstract_trait::user::{DynUserQueryRepository, UserQueryServiceTrait},
    domain::{requests::FindAllUsers, response::UserResponse},
    model::UserStatus,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i32 = 10;
const MAX_PAGE_SIZE: i32 = 100;

#[derive(Clone)]
pub struct UserQueryService {
    query: DynUserQueryRepository,
    metrics: Metrics,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "user_query_service");

        Self { query, metrics }
    }

    async fn paginate(
        &self,
        operation: &str,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        let page = if req.page > 0 { req.page } else { 1 };
        let page_size = if req.page_size > 0 {
            req.page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        };

        info!(
            "🔍 {operation} | Page: {page}, Size: {page_size}, Search: '{}', Status: {:?}",
            req.search, req.status
        );

        let method = Method::Get;
        let tracing_ctx = TracingContext::start("user", operation);

        let normalized = FindAllUsers {
            page,
            page_size,
            ..req.clone()
        };

        let (users, total) = match self.query.find_all(&normalized).await {
            Ok(res) => res,
            Err(e) => {
                error!("❌ Failed to fetch users: {e:?}");
                tracing_ctx.complete_error(&self.metrics, method, "Failed to fetch users");
                return Err(e.into());
            }
        };

        let log_msg = format!("✅ Found {} users", users.len());
        tracing_ctx.complete_success(&self.metrics, method, &log_msg);

        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Users retrieved successfully".into(),
            data: users.into_iter().map(UserResponse::from).collect(),
            pagination: Pagination::new(page, page_size, total),
        })
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        self.paginate("FindAllUsers", req).await
    }

    async fn find_pending(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        let pending = FindAllUsers {
            status: Some(UserStatus::Pending),
            ..req.clone()
        };

        self.paginate("FindSignupRequests", &pending).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = TracingContext::start("user", "FindUserById");

        match self.query.find_by_id(id).await {
            Ok(Some(user)) => {
                tracing_ctx.complete_success(&self.metrics, method, "User found");
                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, method, "User not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to fetch user");
                Err(e.into())
            }
        }
    }
}
