use crate::{
    abstract_trait::DynApprovalService,
    domain::requests::{ApproveUserRequest, ApproveWithCredentialsRequest},
    errors::ApprovalError,
    middleware::validate::ValidatedJson,
    state::AppState,
};
use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use std::sync::Arc;

/// Plain `OPTIONS` probes without CORS request headers still get an answer.
pub async fn preflight_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn approve_user_handler(
    Extension(service): Extension<DynApprovalService>,
    ValidatedJson(body): ValidatedJson<ApproveUserRequest>,
) -> Result<impl IntoResponse, ApprovalError> {
    let response = service.approve_user(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub async fn approve_with_credentials_handler(
    Extension(service): Extension<DynApprovalService>,
    ValidatedJson(body): ValidatedJson<ApproveWithCredentialsRequest>,
) -> Result<impl IntoResponse, ApprovalError> {
    let response = service.approve_with_credentials(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn approval_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/approve-user",
            post(approve_user_handler).options(preflight_handler),
        )
        .route(
            "/approve-user-with-credentials",
            post(approve_with_credentials_handler).options(preflight_handler),
        )
        .layer(Extension(app_state.approval_service.clone()))
}
