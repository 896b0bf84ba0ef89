use serde::{Deserialize, Serialize};
use validator::Validate;

/// Missing fields deserialize as empty strings so that validation reports
/// them by name instead of a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveWithCredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,

    #[serde(default)]
    #[validate(email(message = "userEmail must be a valid email"))]
    pub user_email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "userPassword must be at least 6 characters"))]
    pub user_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::validate_request;

    #[test]
    fn missing_user_id_is_reported_by_name() {
        let req: ApproveUserRequest = serde_json::from_str("{}").unwrap();
        let err = validate_request(&req).unwrap_err();
        assert_eq!(err.to_string(), "userId is required");
    }

    #[test]
    fn credentials_use_camel_case_keys() {
        let req: ApproveWithCredentialsRequest = serde_json::from_str(
            r#"{"userId":"42","userEmail":"ada@uni.edu","userPassword":"secret-pass"}"#,
        )
        .unwrap();

        assert_eq!(req.user_id, "42");
        assert!(validate_request(&req).is_ok());
    }
}
