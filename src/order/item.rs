//! Order item model.

use serde::Serialize;

use super::types::Order;
use crate::product::Product;

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Units ordered (at least 1).
    pub quantity: i64,
    /// Unit price at the time of ordering.
    pub price: f64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// An order item joined with its order and product.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub order: Order,
    pub product: Product,
}

/// Data for creating a new order item.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

impl NewOrderItem {
    pub fn new(order_id: i64, product_id: i64, quantity: i64, price: f64) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
            price,
        }
    }
}

/// Replacement values for an item's quantity and price.
#[derive(Debug, Clone)]
pub struct OrderItemUpdate {
    pub quantity: i64,
    pub price: f64,
}
