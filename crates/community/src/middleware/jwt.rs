use crate::model::Role;
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, config::Claims, errors::ErrorResponse};

pub const SESSION_COOKIE: &str = "token";

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
}

/// Resolves the access token from the session cookie or a bearer header and
/// stores its `Claims` in the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        .or_else(|| {
            cookie_jar
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
        });

    let Some(token) = token else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            "You are not logged in, please provide token",
        ));
    };

    let claims = match jwt.verify_token(&token, "access") {
        Ok(claims) => claims,
        Err(_) => return Err(reject(StatusCode::UNAUTHORIZED, "Invalid token")),
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn require_role(
    req: &Request<Body>,
    role: Role,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    let claims = req.extensions().get::<Claims>().ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            "Missing session in request context",
        )
    })?;

    if Role::from_claim(&claims.role) != Some(role) {
        return Err(reject(
            StatusCode::FORBIDDEN,
            &format!("This action requires the {} role", role.as_str()),
        ));
    }

    Ok(())
}

pub async fn admin_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    require_role(&req, Role::Admin)?;
    Ok(next.run(req).await)
}

pub async fn user_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    require_role(&req, Role::User)?;
    Ok(next.run(req).await)
}
