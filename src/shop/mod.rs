//! Shop module.
//!
//! Sellers own shops; products hang off a shop and ratings target one.

mod repository;
mod types;

pub use repository::ShopRepository;
pub use types::{NewShop, Shop, ShopUpdate, ShopWithSeller};
