//! Order item repository.

use super::item::{NewOrderItem, OrderItem, OrderItemDetail, OrderItemUpdate};
use super::types::{Order, OrderStatus};
use crate::db::DbPool;
use crate::product::Product;
use crate::{DeliveryError, Result};

const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price, created_at, updated_at";

/// Row of the item/order/product join.
#[derive(sqlx::FromRow)]
struct ItemDetailRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    price: f64,
    created_at: String,
    updated_at: Option<String>,
    buyer_id: i64,
    order_amount: f64,
    order_status: OrderStatus,
    order_created_at: String,
    order_updated_at: Option<String>,
    shop_id: i64,
    product_name: String,
    product_description: String,
    product_price: f64,
    product_stock: i64,
    product_created_at: String,
    product_updated_at: Option<String>,
}

impl ItemDetailRow {
    fn into_detail(self) -> OrderItemDetail {
        OrderItemDetail {
            order: Order {
                id: self.order_id,
                buyer_id: self.buyer_id,
                amount: self.order_amount,
                status: self.order_status,
                created_at: self.order_created_at,
                updated_at: self.order_updated_at,
            },
            product: Product {
                id: self.product_id,
                shop_id: self.shop_id,
                product_name: self.product_name,
                description: self.product_description,
                price: self.product_price,
                stock: self.product_stock,
                created_at: self.product_created_at,
                updated_at: self.product_updated_at,
            },
            item: OrderItem {
                id: self.id,
                order_id: self.order_id,
                product_id: self.product_id,
                quantity: self.quantity,
                price: self.price,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

/// Repository for order item CRUD operations.
pub struct OrderItemRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> OrderItemRepository<'a> {
    /// Create a new OrderItemRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Add an item to an order.
    ///
    /// An unknown order or product surfaces as `DeliveryError::Validation`.
    pub async fn create(&self, new_item: &NewOrderItem) -> Result<OrderItem> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO order_items (order_id, product_id, quantity, price)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(new_item.order_id)
        .bind(new_item.product_id)
        .bind(new_item.quantity)
        .bind(new_item.price)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("order item".to_string()))
    }

    /// Get an item by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<OrderItem>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE id = $1");
        let item = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(item)
    }

    /// Get an item joined with its order and product.
    pub async fn get_detail(&self, id: i64) -> Result<Option<OrderItemDetail>> {
        let row: Option<ItemDetailRow> = sqlx::query_as(
            "SELECT i.id, i.order_id, i.product_id, i.quantity, i.price,
                    i.created_at, i.updated_at,
                    o.buyer_id, o.amount AS order_amount, o.status AS order_status,
                    o.created_at AS order_created_at, o.updated_at AS order_updated_at,
                    p.shop_id, p.product_name, p.description AS product_description,
                    p.price AS product_price, p.stock AS product_stock,
                    p.created_at AS product_created_at, p.updated_at AS product_updated_at
             FROM order_items i
             JOIN orders o ON i.order_id = o.id
             JOIN products p ON i.product_id = p.id
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ItemDetailRow::into_detail))
    }

    /// List items, optionally restricted to one order.
    pub async fn list(&self, order_id: Option<i64>) -> Result<Vec<OrderItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE ($1 IS NULL OR order_id = $1) ORDER BY id"
        );
        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(self.pool)
            .await?;
        Ok(items)
    }

    /// Buyer owning the order this item belongs to.
    pub async fn owner_of(&self, id: i64) -> Result<Option<i64>> {
        let owner: Option<i64> = sqlx::query_scalar(
            "SELECT o.buyer_id FROM order_items i JOIN orders o ON i.order_id = o.id
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(owner)
    }

    /// Replace an item's quantity and price.
    ///
    /// Returns the updated item, or None if not found.
    pub async fn update(&self, id: i64, update: &OrderItemUpdate) -> Result<Option<OrderItem>> {
        let result = sqlx::query(
            "UPDATE order_items SET quantity = $1, price = $2, updated_at = datetime('now')
             WHERE id = $3",
        )
        .bind(update.quantity)
        .bind(update.price)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete an item by ID.
    ///
    /// Returns true if an item was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, Role, UserRepository};
    use crate::order::{NewOrder, OrderRepository};
    use crate::product::{NewProduct, ProductRepository};
    use crate::shop::{NewShop, ShopRepository};
    use crate::Database;

    struct Fixture {
        db: Database,
        buyer_id: i64,
        order_id: i64,
        product_id: i64,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let seller = users
            .create(&NewUser::new("sam", "sam@x.com", "d").with_role(Role::Seller))
            .await
            .unwrap();
        let buyer = users
            .create(&NewUser::new("alice", "alice@x.com", "d"))
            .await
            .unwrap();
        let shop = ShopRepository::new(db.pool())
            .create(&NewShop::new(seller.id, "Warung"))
            .await
            .unwrap();
        let product = ProductRepository::new(db.pool())
            .create(&NewProduct::new(shop.id, "Mie", 15000.0).with_stock(5))
            .await
            .unwrap();
        let order = OrderRepository::new(db.pool())
            .create(&NewOrder::new(buyer.id, 30000.0))
            .await
            .unwrap();

        Fixture {
            db,
            buyer_id: buyer.id,
            order_id: order.id,
            product_id: product.id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let f = setup().await;
        let repo = OrderItemRepository::new(f.db.pool());

        let item = repo
            .create(&NewOrderItem::new(f.order_id, f.product_id, 2, 15000.0))
            .await
            .unwrap();
        assert_eq!(item.quantity, 2);

        let detail = repo.get_detail(item.id).await.unwrap().unwrap();
        assert_eq!(detail.item, item);
        assert_eq!(detail.order.id, f.order_id);
        assert_eq!(detail.order.buyer_id, f.buyer_id);
        assert_eq!(detail.product.id, f.product_id);
        assert_eq!(detail.product.product_name, "Mie");

        assert_eq!(repo.owner_of(item.id).await.unwrap(), Some(f.buyer_id));
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let f = setup().await;
        let repo = OrderItemRepository::new(f.db.pool());

        let result = repo
            .create(&NewOrderItem::new(f.order_id, f.product_id, 0, 1.0))
            .await;
        assert!(matches!(result, Err(DeliveryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let f = setup().await;
        let repo = OrderItemRepository::new(f.db.pool());

        let result = repo
            .create(&NewOrderItem::new(f.order_id, 999, 1, 1.0))
            .await;
        assert!(matches!(result, Err(DeliveryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_order() {
        let f = setup().await;
        let other_order = OrderRepository::new(f.db.pool())
            .create(&NewOrder::new(f.buyer_id, 1.0))
            .await
            .unwrap();
        let repo = OrderItemRepository::new(f.db.pool());

        repo.create(&NewOrderItem::new(f.order_id, f.product_id, 1, 1.0))
            .await
            .unwrap();
        repo.create(&NewOrderItem::new(other_order.id, f.product_id, 1, 1.0))
            .await
            .unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some(f.order_id)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let f = setup().await;
        let repo = OrderItemRepository::new(f.db.pool());
        let item = repo
            .create(&NewOrderItem::new(f.order_id, f.product_id, 1, 1.0))
            .await
            .unwrap();

        let updated = repo
            .update(
                item.id,
                &OrderItemUpdate {
                    quantity: 3,
                    price: 1.5,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert!(updated.updated_at.is_some());

        assert!(repo.delete(item.id).await.unwrap());
        assert!(repo.get_detail(item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_items_removed_with_order() {
        let f = setup().await;
        let repo = OrderItemRepository::new(f.db.pool());
        let item = repo
            .create(&NewOrderItem::new(f.order_id, f.product_id, 1, 1.0))
            .await
            .unwrap();

        OrderRepository::new(f.db.pool())
            .delete(f.order_id)
            .await
            .unwrap();
        assert!(repo.get_by_id(item.id).await.unwrap().is_none());
    }
}
