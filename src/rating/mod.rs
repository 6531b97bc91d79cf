//! Rating module.
//!
//! Buyers rate a shop (1 to 5) against one of their orders.

mod repository;
mod types;

pub use repository::RatingRepository;
pub use types::{NewRating, Rating, RatingUpdate};
