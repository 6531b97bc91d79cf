//! API error handling.
//!
//! Every failure leaves the server as `{"error": {"code", "message"}}`.
//! Library error text is logged, never returned.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::TokenError;
use crate::DeliveryError;

/// Machine-readable error code, one per HTTP status the API emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    /// Request body failed field rules; `details` lists them.
    ValidationError,
    /// Well-formed request the data cannot satisfy (unknown reference).
    UnprocessableEntity,
    InternalError,
}

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError | ErrorCode::UnprocessableEntity => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error returned by every handler and extractor.
#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<FieldErrors>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a FieldErrors>,
}

impl ApiError {
    fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Conflict, message)
    }

    /// 422 for a request whose references cannot be satisfied.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::UnprocessableEntity, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::InternalError, message)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => format!("Invalid value for {}", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
                details: self.details.as_ref(),
            },
        };
        (StatusCode::from(self.code), Json(body)).into_response()
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match &err {
            DeliveryError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            DeliveryError::NotFound(what) => ApiError::not_found(format!("{} not found", what)),
            DeliveryError::Validation(msg) => ApiError::unprocessable(msg.clone()),
            DeliveryError::Forbidden(msg) => ApiError::forbidden(msg.clone()),
            DeliveryError::InUse(what) => ApiError::conflict(format!(
                "{} is still referenced by existing orders",
                capitalize(what)
            )),
            DeliveryError::Conflict(detail) => {
                tracing::debug!("Constraint conflict: {}", detail);
                ApiError::conflict("Resource already exists")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Revoked => ApiError::unauthorized("Token revoked or invalid"),
            TokenError::UnexpectedAlgorithm => ApiError::unauthorized("Unexpected signing method"),
            TokenError::InvalidSignature => ApiError::unauthorized("Invalid token signature"),
            TokenError::Expired => ApiError::unauthorized("Token expired"),
            TokenError::InvalidClaims => ApiError::unauthorized("Invalid token claims"),
            TokenError::Malformed => ApiError::unauthorized("Invalid token"),
            TokenError::Signing(detail) => {
                tracing::error!("Failed to sign token: {}", detail);
                ApiError::internal("Failed to generate token")
            }
        }
    }
}
