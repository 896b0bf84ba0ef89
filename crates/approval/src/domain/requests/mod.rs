mod approve;
mod provider;

pub use self::approve::{ApproveUserRequest, ApproveWithCredentialsRequest};
pub use self::provider::NewAuthUser;

use crate::errors::ApprovalError;
use validator::{Validate, ValidationErrors};

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .collect();

    messages.sort();
    messages.join("; ")
}

pub fn validate_request<T: Validate>(req: &T) -> Result<(), ApprovalError> {
    req.validate()
        .map_err(|e| ApprovalError::Validation(validation_message(&e)))
}
