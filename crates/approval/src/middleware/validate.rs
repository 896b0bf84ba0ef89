use crate::{domain::requests::validate_request, errors::ApprovalError};
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor whose rejections use the `{ success, error }` error body.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApprovalError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApprovalError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
            })?;

        validate_request(&value)?;

        Ok(Self(value))
    }
}
