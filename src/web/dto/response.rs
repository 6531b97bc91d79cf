//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::{Role, User};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Confirmation body for deletes and logout.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth / users
// ============================================================================

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (JWT).
    pub token: String,
    /// Token expiry (Unix seconds).
    pub expires_at: i64,
    /// Logged-in user.
    pub user: UserResponse,
}

/// User record as returned by the API. Never includes the password digest.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub instagram_link: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            role: user.role,
            address: user.address,
            phone_number: user.phone_number,
            profile_picture: user.profile_picture,
            instagram_link: user.instagram_link,
            description: user.description,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            user_name: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            address: None,
            phone_number: Some("0812".to_string()),
            role: Role::Buyer,
            description: None,
            profile_picture: None,
            instagram_link: None,
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_user_response_hides_digest() {
        let json = serde_json::to_value(UserResponse::from(sample_user())).unwrap();

        assert_eq!(json["user_name"], "alice");
        assert_eq!(json["role"], "buyer");
        assert_eq!(json["phone_number"], "0812");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_api_response_envelope() {
        let json = serde_json::to_value(ApiResponse::new(MessageResponse::new("done"))).unwrap();
        assert_eq!(json["data"]["message"], "done");
    }
}
