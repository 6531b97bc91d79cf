//! Error types for the delivery backend.

use thiserror::Error;

/// Common error type for the delivery backend.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Database error.
    ///
    /// Wraps any sqlx failure that is not a constraint violation.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Unique constraint conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Row cannot be deleted while other rows reference it.
    #[error("{0} is still referenced by other records")]
    InUse(String),

    /// Password hashing backend failure.
    #[error("hashing error: {0}")]
    Hash(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for DeliveryError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DeliveryError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return DeliveryError::Validation("referenced record does not exist".to_string());
            }
            if db_err.is_check_violation() {
                return DeliveryError::Validation("value out of range".to_string());
            }
        }
        DeliveryError::Database(e.to_string())
    }
}

impl DeliveryError {
    /// Convert a failed DELETE, reporting a foreign-key violation as
    /// [`DeliveryError::InUse`] for `what`.
    pub(crate) fn on_delete(what: &str) -> impl FnOnce(sqlx::Error) -> Self + '_ {
        move |e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                DeliveryError::InUse(what.to_string())
            }
            other => other.into(),
        }
    }
}

/// Result type alias for delivery backend operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;
