//! Product model.

use serde::Serialize;

/// A product listed by a shop.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: i64,
    /// Shop offering the product.
    pub shop_id: i64,
    pub product_name: String,
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Data for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub shop_id: i64,
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl NewProduct {
    /// Create a new product with no description and zero stock.
    pub fn new(shop_id: i64, product_name: impl Into<String>, price: f64) -> Self {
        Self {
            shop_id,
            product_name: product_name.into(),
            description: String::new(),
            price,
            stock: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock count.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }
}

/// Replacement values for a product's editable fields.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}
