use crate::{
    abstract_trait::user::DynProfileService,
    domain::{
        requests::{ChangePasswordRequest, UpdateProfileRequest},
        response::UserResponse,
    },
    middleware::{
        jwt::{auth_middleware, user_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    middleware,
    response::IntoResponse,
    routing::put,
};
use shared::{config::Claims, domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

fn session_user_id(claims: &Claims) -> Result<Uuid, HttpError> {
    Uuid::parse_str(&claims.sub).map_err(|_| HttpError::Unauthorized("Invalid session".into()))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Only members can edit a profile"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_profile(
    Extension(service): Extension<DynProfileService>,
    Extension(claims): Extension<Claims>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user_id = session_user_id(&claims)?;
    let response = service.update_profile(user_id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/profile/password",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<bool>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Current password is wrong")
    )
)]
pub async fn change_password(
    Extension(service): Extension<DynProfileService>,
    Extension(claims): Extension<Claims>,
    SimpleValidatedJson(body): SimpleValidatedJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user_id = session_user_id(&claims)?;
    let response = service.change_password(user_id, &body).await?;
    Ok(Json(response))
}

pub fn profile_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/profile", put(update_profile))
        .route("/api/profile/password", put(change_password))
        .route_layer(middleware::from_fn(user_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.profile_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
