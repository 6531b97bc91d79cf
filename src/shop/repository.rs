//! Shop repository.

use super::types::{NewShop, Shop, ShopUpdate, ShopWithSeller};
use crate::db::{DbPool, UserSummary};
use crate::{DeliveryError, Result};

const SHOP_COLUMNS: &str =
    "id, seller_id, shop_name, shop_description, shop_address, created_at, updated_at";

/// Row of the shop/seller join.
#[derive(sqlx::FromRow)]
struct ShopSellerRow {
    id: i64,
    seller_id: i64,
    shop_name: String,
    shop_description: String,
    shop_address: String,
    created_at: String,
    updated_at: Option<String>,
    seller_name: String,
    seller_email: String,
    seller_address: Option<String>,
}

impl ShopSellerRow {
    fn into_view(self) -> ShopWithSeller {
        ShopWithSeller {
            seller: UserSummary {
                id: self.seller_id,
                user_name: self.seller_name,
                email: self.seller_email,
                address: self.seller_address,
            },
            shop: Shop {
                id: self.id,
                seller_id: self.seller_id,
                shop_name: self.shop_name,
                shop_description: self.shop_description,
                shop_address: self.shop_address,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

/// Repository for shop CRUD operations.
pub struct ShopRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new ShopRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new shop.
    ///
    /// An unknown seller surfaces as `DeliveryError::Validation`.
    pub async fn create(&self, new_shop: &NewShop) -> Result<Shop> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO shops (seller_id, shop_name, shop_description, shop_address)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(new_shop.seller_id)
        .bind(&new_shop.shop_name)
        .bind(&new_shop.shop_description)
        .bind(&new_shop.shop_address)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("shop".to_string()))
    }

    /// Get a shop by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Shop>> {
        let sql = format!("SELECT {SHOP_COLUMNS} FROM shops WHERE id = $1");
        let shop = sqlx::query_as::<_, Shop>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(shop)
    }

    /// Get a shop joined with its seller.
    pub async fn get_with_seller(&self, id: i64) -> Result<Option<ShopWithSeller>> {
        let row: Option<ShopSellerRow> = sqlx::query_as(
            "SELECT s.id, s.seller_id, s.shop_name, s.shop_description, s.shop_address,
                    s.created_at, s.updated_at,
                    u.user_name AS seller_name, u.email AS seller_email,
                    u.address AS seller_address
             FROM shops s JOIN users u ON s.seller_id = u.id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ShopSellerRow::into_view))
    }

    /// List all shops ordered by ID.
    pub async fn list(&self) -> Result<Vec<Shop>> {
        let sql = format!("SELECT {SHOP_COLUMNS} FROM shops ORDER BY id");
        let shops = sqlx::query_as::<_, Shop>(&sql).fetch_all(self.pool).await?;
        Ok(shops)
    }

    /// Replace a shop's editable fields.
    ///
    /// Returns the updated shop, or None if not found.
    pub async fn update(&self, id: i64, update: &ShopUpdate) -> Result<Option<Shop>> {
        let result = sqlx::query(
            "UPDATE shops SET shop_name = $1, shop_description = $2, shop_address = $3,
                              updated_at = datetime('now')
             WHERE id = $4",
        )
        .bind(&update.shop_name)
        .bind(&update.shop_description)
        .bind(&update.shop_address)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a shop by ID.
    ///
    /// Returns true if a shop was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DeliveryError::on_delete("shop"))?;
        Ok(result.rows_affected() > 0)
    }
}
