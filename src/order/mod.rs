//! Order module.
//!
//! This module provides buyer orders and the items they contain:
//! - Orders with a lifecycle status
//! - Order items referencing a product with quantity and unit price

mod item;
mod item_repository;
mod repository;
mod types;

pub use item::{NewOrderItem, OrderItem, OrderItemDetail, OrderItemUpdate};
pub use item_repository::OrderItemRepository;
pub use repository::OrderRepository;
pub use types::{NewOrder, Order, OrderStatus, OrderUpdate, OrderWithBuyer};
