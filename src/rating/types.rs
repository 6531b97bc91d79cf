//! Rating model.

use serde::Serialize;

/// A buyer's rating of a shop.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Rating {
    pub id: i64,
    /// Order the rating refers to.
    pub order_id: i64,
    /// Author.
    pub buyer_id: i64,
    /// Rated shop.
    pub shop_id: i64,
    /// Score from 1 to 5.
    pub rating: i64,
    pub feedback: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl Rating {
    /// Check if the given user wrote this rating.
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.buyer_id == user_id
    }
}

/// Data for creating a new rating.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub order_id: i64,
    pub buyer_id: i64,
    pub shop_id: i64,
    pub rating: i64,
    pub feedback: String,
}

/// Replacement values for a rating's score and feedback.
#[derive(Debug, Clone)]
pub struct RatingUpdate {
    pub rating: i64,
    pub feedback: String,
}
