//! Product repository.

use super::types::{NewProduct, Product, ProductUpdate};
use crate::db::DbPool;
use crate::{DeliveryError, Result};

const PRODUCT_COLUMNS: &str =
    "id, shop_id, product_name, description, price, stock, created_at, updated_at";

/// Repository for product CRUD operations.
pub struct ProductRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new ProductRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new product.
    pub async fn create(&self, new_product: &NewProduct) -> Result<Product> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (shop_id, product_name, description, price, stock)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(new_product.shop_id)
        .bind(&new_product.product_name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(new_product.stock)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("product".to_string()))
    }

    /// Get a product by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// List products, optionally restricted to one shop.
    pub async fn list(&self, shop_id: Option<i64>) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE ($1 IS NULL OR shop_id = $1) ORDER BY id"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(shop_id)
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }

    /// Seller owning the shop that lists this product.
    pub async fn owner_of(&self, id: i64) -> Result<Option<i64>> {
        let owner: Option<i64> = sqlx::query_scalar(
            "SELECT s.seller_id FROM products p JOIN shops s ON p.shop_id = s.id
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(owner)
    }

    /// Replace a product's editable fields.
    ///
    /// Returns the updated product, or None if not found.
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> Result<Option<Product>> {
        let result = sqlx::query(
            "UPDATE products SET product_name = $1, description = $2, price = $3, stock = $4,
                                 updated_at = datetime('now')
             WHERE id = $5",
        )
        .bind(&update.product_name)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.stock)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a product by ID.
    ///
    /// Returns true if a product was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DeliveryError::on_delete("product"))?;
        Ok(result.rows_affected() > 0)
    }
}
