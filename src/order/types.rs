//! Order model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::db::UserSummary;

/// Order lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("unknown order status: {s}")),
        }
    }
}

/// A buyer's order.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: i64,
    /// Buyer who placed the order.
    pub buyer_id: i64,
    /// Total amount.
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl Order {
    /// Check if the given user placed this order.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.buyer_id == user_id
    }
}

/// An order joined with its buyer.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithBuyer {
    #[serde(flatten)]
    pub order: Order,
    pub buyer: UserSummary,
}

/// Data for creating a new order. Orders always start out pending.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub buyer_id: i64,
    pub amount: f64,
}

impl NewOrder {
    pub fn new(buyer_id: i64, amount: f64) -> Self {
        Self { buyer_id, amount }
    }
}

/// Replacement values for an order's editable fields.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub amount: f64,
    pub status: OrderStatus,
}
