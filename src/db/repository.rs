//! User repository (credential store).
//!
//! This module provides CRUD operations for users in the database.

use super::user::{NewUser, ProfilePatch, User};
use super::DbPool;
use crate::{DeliveryError, Result};

const USER_COLUMNS: &str = "id, user_name, email, password_hash, address, phone_number, role,
                    description, profile_picture, instagram_link, created_at, updated_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate email or
    /// user name surfaces as `DeliveryError::Conflict`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (user_name, email, password_hash, role)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_user.user_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Look up a user by email (case-insensitive). Used by login.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// List all users ordered by ID.
    pub async fn list(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(self.pool).await?;
        Ok(users)
    }

    /// Apply a profile completion patch.
    ///
    /// The statement is fixed: every column is guarded by its presence flag,
    /// so absent fields keep their current value. `updated_at` is refreshed
    /// whenever the patch is non-empty. Returns None if the user is gone.
    pub async fn complete_profile(&self, id: i64, patch: &ProfilePatch) -> Result<Option<User>> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let result = sqlx::query(
            "UPDATE users SET
                address         = CASE WHEN $1 THEN $2  ELSE address         END,
                phone_number    = CASE WHEN $3 THEN $4  ELSE phone_number    END,
                profile_picture = CASE WHEN $5 THEN $6  ELSE profile_picture END,
                instagram_link  = CASE WHEN $7 THEN $8  ELSE instagram_link  END,
                description     = CASE WHEN $9 THEN $10 ELSE description     END,
                updated_at      = datetime('now')
             WHERE id = $11",
        )
        .bind(patch.address.is_some())
        .bind(patch.address.as_deref())
        .bind(patch.phone_number.is_some())
        .bind(patch.phone_number.as_deref())
        .bind(patch.profile_picture.is_some())
        .bind(patch.profile_picture.as_deref())
        .bind(patch.instagram_link.is_some())
        .bind(patch.instagram_link.as_deref())
        .bind(patch.description.is_some())
        .bind(patch.description.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}
