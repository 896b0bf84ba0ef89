use crate::{
    abstract_trait::user::{DynApprovalService, DynStatsService, DynUserQueryService},
    domain::{
        requests::FindAllUsers,
        response::{DashboardStatsResponse, UserResponse},
    },
    middleware::jwt::{admin_middleware, auth_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "Members matching the filter", body = ApiResponsePagination<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserQueryService>,
    Query(params): Query<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/signup-requests",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "Pending signup requests", body = ApiResponsePagination<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_signup_requests(
    Extension(service): Extension<DynUserQueryService>,
    Query(params): Query<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_pending(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = ApiResponse<UserResponse>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_user(
    Extension(service): Extension<DynUserQueryService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/approve",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member approved", body = ApiResponse<UserResponse>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn approve_user(
    Extension(service): Extension<DynApprovalService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.approve_user(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/reject",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member rejected", body = ApiResponse<UserResponse>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn reject_user(
    Extension(service): Extension<DynApprovalService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reject_user(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/suspend",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member suspended", body = ApiResponse<UserResponse>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn suspend_user(
    Extension(service): Extension<DynApprovalService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.suspend_user(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/reinstate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member reinstated", body = ApiResponse<UserResponse>),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Member is not suspended")
    )
)]
pub async fn reinstate_user(
    Extension(service): Extension<DynApprovalService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reinstate_user(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted", body = ApiResponse<bool>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_user(
    Extension(service): Extension<DynApprovalService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_user(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member counts per status", body = ApiResponse<DashboardStatsResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_stats(
    Extension(service): Extension<DynStatsService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.dashboard_stats().await?;
    Ok(Json(response))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/signup-requests", get(get_signup_requests))
        .route("/api/admin/users/{id}", get(get_user).delete(delete_user))
        .route("/api/admin/users/{id}/approve", post(approve_user))
        .route("/api/admin/users/{id}/reject", post(reject_user))
        .route("/api/admin/users/{id}/suspend", post(suspend_user))
        .route("/api/admin/users/{id}/reinstate", post(reinstate_user))
        .route("/api/admin/stats", get(get_stats))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.user_query_service.clone()))
        .layer(Extension(app_state.di_container.approval_service.clone()))
        .layer(Extension(app_state.di_container.stats_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
