//! API handlers.

pub mod auth;
pub mod order;
pub mod order_item;
pub mod product;
pub mod rating;
pub mod shop;
pub mod user;

pub use auth::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
pub use rating::*;
pub use shop::*;
pub use user::*;

use crate::web::error::ApiError;

/// Parse a path id, naming the resource in the error.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", resource)))
}
