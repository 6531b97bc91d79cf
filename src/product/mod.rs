//! Product module.

mod repository;
mod types;

pub use repository::ProductRepository;
pub use types::{NewProduct, Product, ProductUpdate};
