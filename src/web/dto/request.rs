//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::db::{ProfilePatch, Role};
use crate::order::OrderStatus;

// ============================================================================
// Auth / users
// ============================================================================

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 50, message = "User name must be 1-50 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub user_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Defaults to buyer.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request.
///
/// Presence is checked by the handler: an empty field is a bad request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile completion request. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompleteProfileRequest {
    #[validate(length(max = 255), custom(function = "no_control_chars"))]
    pub address: Option<String>,
    #[validate(length(max = 32), custom(function = "no_control_chars"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 2048))]
    pub profile_picture: Option<String>,
    #[validate(length(max = 2048))]
    pub instagram_link: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<CompleteProfileRequest> for ProfilePatch {
    fn from(req: CompleteProfileRequest) -> Self {
        ProfilePatch {
            address: req.address,
            phone_number: req.phone_number,
            profile_picture: req.profile_picture,
            instagram_link: req.instagram_link,
            description: req.description,
        }
    }
}

// ============================================================================
// Shops
// ============================================================================

/// Shop create / update request.
#[derive(Debug, Deserialize, Validate)]
pub struct ShopRequest {
    #[validate(
        length(min = 1, max = 100, message = "Shop name must be 1-100 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub shop_name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub shop_description: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub shop_address: String,
}

// ============================================================================
// Products
// ============================================================================

/// Product creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub shop_id: i64,
    #[validate(
        length(min = 1, max = 100),
        custom(function = "not_empty_trimmed")
    )]
    pub product_name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i64,
}

/// Product update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "not_empty_trimmed")
    )]
    pub product_name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i64,
}

/// Product list filter.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub shop_id: Option<i64>,
}

// ============================================================================
// Orders
// ============================================================================

/// Order creation request. The buyer is the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
}

/// Order update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
    pub status: OrderStatus,
}

// ============================================================================
// Order items
// ============================================================================

/// Order item creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderItemRequest {
    pub order_id: i64,
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Order item update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderItemRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Order item list filter.
#[derive(Debug, Default, Deserialize)]
pub struct OrderItemListQuery {
    pub order_id: Option<i64>,
}

// ============================================================================
// Ratings
// ============================================================================

/// Rating creation request. The author is the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingRequest {
    pub order_id: i64,
    pub shop_id: i64,
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    pub rating: i64,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub feedback: String,
}

/// Rating update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRatingRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    pub rating: i64,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub feedback: String,
}

/// Rating list filter.
#[derive(Debug, Default, Deserialize)]
pub struct RatingListQuery {
    pub shop_id: Option<i64>,
}
