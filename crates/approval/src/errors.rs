use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The auth provider answered but refused the call; its message is kept.
    #[error("{0}")]
    Provider(String),

    #[error("Auth provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApprovalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApprovalError::Validation(_) | ApprovalError::Provider(_) => StatusCode::BAD_REQUEST,
            ApprovalError::NotFound(_) => StatusCode::NOT_FOUND,
            ApprovalError::Transport(_) | ApprovalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApprovalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_messages_pass_through_as_bad_request() {
        let err = ApprovalError::Provider("A user with this email address has already been registered".into());

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "A user with this email address has already been registered"
        );
    }

    #[test]
    fn unknown_requests_and_internal_failures_map_to_their_codes() {
        assert_eq!(
            ApprovalError::NotFound("Signup request not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApprovalError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
