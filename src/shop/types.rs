//! Shop model.

use serde::Serialize;

use crate::db::UserSummary;

/// A seller's shop.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Shop {
    /// Unique shop ID.
    pub id: i64,
    /// Owning seller.
    pub seller_id: i64,
    pub shop_name: String,
    pub shop_description: String,
    pub shop_address: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

impl Shop {
    /// Check if the given user owns this shop.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.seller_id == user_id
    }
}

/// A shop joined with its seller.
#[derive(Debug, Clone, Serialize)]
pub struct ShopWithSeller {
    #[serde(flatten)]
    pub shop: Shop,
    pub seller: UserSummary,
}

/// Data for creating a new shop.
#[derive(Debug, Clone)]
pub struct NewShop {
    pub seller_id: i64,
    pub shop_name: String,
    pub shop_description: String,
    pub shop_address: String,
}

impl NewShop {
    /// Create a new shop with an empty description and address.
    pub fn new(seller_id: i64, shop_name: impl Into<String>) -> Self {
        Self {
            seller_id,
            shop_name: shop_name.into(),
            shop_description: String::new(),
            shop_address: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.shop_description = description.into();
        self
    }

    /// Set the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.shop_address = address.into();
        self
    }
}

/// Replacement values for a shop's editable fields.
#[derive(Debug, Clone)]
pub struct ShopUpdate {
    pub shop_name: String,
    pub shop_description: String,
    pub shop_address: String,
}
