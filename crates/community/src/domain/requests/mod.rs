mod auth;
mod user;

pub use self::auth::{LoginRequest, RefreshTokenRequest, SignupRequest};
pub use self::user::{ChangePasswordRequest, CreateUserRecord, FindAllUsers, UpdateProfileRequest};

use shared::errors::ServiceError;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

const MIN_NAME_CHARS: usize = 2;

/// Names are stored trimmed, so the length rule applies to the trimmed value.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Name must be at least 2 characters")));
    }
    Ok(())
}

pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                format!("{field}: {message}")
            })
        })
        .collect();

    // nested structs (social links) report under their own key
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::Struct(nested) = kind {
            messages.extend(
                validation_messages(nested)
                    .into_iter()
                    .map(|m| format!("{field}.{m}")),
            );
        }
    }

    messages.sort();
    messages
}

pub fn validate_request<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate()
        .map_err(|e| ServiceError::Validation(validation_messages(&e)))
}
