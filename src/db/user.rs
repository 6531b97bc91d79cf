//! User model for the credential store.
//!
//! This module defines the User record, the buyer/seller Role and the
//! profile patch applied by profile completion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marketplace role of a registered user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Places orders and rates shops.
    #[default]
    Buyer,
    /// Owns shops and lists products.
    Seller,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A registered user (buyer or seller).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display / login name (unique).
    pub user_name: String,
    /// Email address used to log in (unique, case-insensitive).
    pub email: String,
    /// Argon2 PHC digest.
    pub password_hash: String,
    /// Delivery address.
    pub address: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Marketplace role.
    pub role: Role,
    /// Free-form self description.
    pub description: Option<String>,
    /// Profile picture URL.
    pub profile_picture: Option<String>,
    /// Instagram profile link.
    pub instagram_link: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last profile update timestamp.
    pub updated_at: Option<String>,
}

impl User {
    /// Whether this user may own shops.
    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}

/// Public part of a user embedded in joined views (shop seller, order buyer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub address: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
        }
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display / login name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Password digest (already hashed).
    pub password_hash: String,
    /// Role (defaults to Buyer).
    pub role: Role,
}

impl NewUser {
    /// Create a new buyer with the required fields.
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::Buyer,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Profile completion patch.
///
/// Each field pairs a presence flag with its value: `None` leaves the column
/// untouched, `Some(v)` overwrites it. The repository binds both halves into a
/// single fixed UPDATE statement.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub instagram_link: Option<String>,
    pub description: Option<String>,
}

impl ProfilePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }

    pub fn instagram_link(mut self, link: impl Into<String>) -> Self {
        self.instagram_link = Some(link.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if no field is present.
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.phone_number.is_none()
            && self.profile_picture.is_none()
            && self.instagram_link.is_none()
            && self.description.is_none()
    }
}
