//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// A body that is not JSON, or that lacks a required field, is a bad request
/// (400). A body that parses but breaks a field rule is a validation error
/// (422) with per-field details.
///
/// # Example
///
/// ```ignore
/// use delivery::web::dto::ValidatedJson;
///
/// async fn create_shop(
///     ValidatedJson(payload): ValidatedJson<ShopRequest>,
/// ) -> Result<Json<ApiResponse<Shop>>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected request body: {}", e.body_text());
            ApiError::bad_request("Invalid request payload")
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a string does not contain control characters or NULL bytes.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}
