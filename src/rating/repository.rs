//! Rating repository.

use super::types::{NewRating, Rating, RatingUpdate};
use crate::db::DbPool;
use crate::{DeliveryError, Result};

const RATING_COLUMNS: &str =
    "id, order_id, buyer_id, shop_id, rating, feedback, created_at, updated_at";

/// Repository for rating CRUD operations.
pub struct RatingRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RatingRepository<'a> {
    /// Create a new RatingRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new rating.
    pub async fn create(&self, new_rating: &NewRating) -> Result<Rating> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO ratings (order_id, buyer_id, shop_id, rating, feedback)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(new_rating.order_id)
        .bind(new_rating.buyer_id)
        .bind(new_rating.shop_id)
        .bind(new_rating.rating)
        .bind(&new_rating.feedback)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("rating".to_string()))
    }

    /// Get a rating by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Rating>> {
        let sql = format!("SELECT {RATING_COLUMNS} FROM ratings WHERE id = $1");
        let rating = sqlx::query_as::<_, Rating>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(rating)
    }

    /// List ratings, optionally restricted to one shop.
    pub async fn list(&self, shop_id: Option<i64>) -> Result<Vec<Rating>> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings
             WHERE ($1 IS NULL OR shop_id = $1) ORDER BY id"
        );
        let ratings = sqlx::query_as::<_, Rating>(&sql)
            .bind(shop_id)
            .fetch_all(self.pool)
            .await?;
        Ok(ratings)
    }

    /// Replace a rating's score and feedback.
    ///
    /// Returns the updated rating, or None if not found.
    pub async fn update(&self, id: i64, update: &RatingUpdate) -> Result<Option<Rating>> {
        let result = sqlx::query(
            "UPDATE ratings SET rating = $1, feedback = $2, updated_at = datetime('now')
             WHERE id = $3",
        )
        .bind(update.rating)
        .bind(&update.feedback)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a rating by ID.
    ///
    /// Returns true if a rating was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
