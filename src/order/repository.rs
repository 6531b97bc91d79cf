//! Order repository.

use super::types::{NewOrder, Order, OrderStatus, OrderUpdate, OrderWithBuyer};
use crate::db::{DbPool, UserSummary};
use crate::{DeliveryError, Result};

const ORDER_COLUMNS: &str = "id, buyer_id, amount, status, created_at, updated_at";

/// Row of the order/buyer join.
#[derive(sqlx::FromRow)]
struct OrderBuyerRow {
    id: i64,
    buyer_id: i64,
    amount: f64,
    status: OrderStatus,
    created_at: String,
    updated_at: Option<String>,
    buyer_name: String,
    buyer_email: String,
    buyer_address: Option<String>,
}

impl OrderBuyerRow {
    fn into_view(self) -> OrderWithBuyer {
        OrderWithBuyer {
            buyer: UserSummary {
                id: self.buyer_id,
                user_name: self.buyer_name,
                email: self.buyer_email,
                address: self.buyer_address,
            },
            order: Order {
                id: self.id,
                buyer_id: self.buyer_id,
                amount: self.amount,
                status: self.status,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

/// Repository for order CRUD operations.
pub struct OrderRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new OrderRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new pending order.
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (buyer_id, amount, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_order.buyer_id)
        .bind(new_order.amount)
        .bind(OrderStatus::Pending)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound("order".to_string()))
    }

    /// Get an order by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(order)
    }

    /// Get an order joined with its buyer.
    pub async fn get_with_buyer(&self, id: i64) -> Result<Option<OrderWithBuyer>> {
        let row: Option<OrderBuyerRow> = sqlx::query_as(
            "SELECT o.id, o.buyer_id, o.amount, o.status, o.created_at, o.updated_at,
                    u.user_name AS buyer_name, u.email AS buyer_email,
                    u.address AS buyer_address
             FROM orders o JOIN users u ON o.buyer_id = u.id
             WHERE o.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(OrderBuyerRow::into_view))
    }

    /// List all orders ordered by ID.
    pub async fn list(&self) -> Result<Vec<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id");
        let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(self.pool).await?;
        Ok(orders)
    }

    /// Replace an order's amount and status.
    ///
    /// Returns the updated order, or None if not found.
    pub async fn update(&self, id: i64, update: &OrderUpdate) -> Result<Option<Order>> {
        let result = sqlx::query(
            "UPDATE orders SET amount = $1, status = $2, updated_at = datetime('now')
             WHERE id = $3",
        )
        .bind(update.amount)
        .bind(update.status)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete an order and, by cascade, its items.
    ///
    /// Returns true if an order was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let buyer = UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "alice@x.com", "digest"))
            .await
            .unwrap();
        (db, buyer.id)
    }

    #[tokio::test]
    async fn test_create_order_starts_pending() {
        let (db, buyer_id) = setup().await;
        let repo = OrderRepository::new(db.pool());

        let order = repo.create(&NewOrder::new(buyer_id, 30000.0)).await.unwrap();

        assert_eq!(order.buyer_id, buyer_id);
        assert_eq!(order.amount, 30000.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.is_owned_by(buyer_id));
    }

    #[tokio::test]
    async fn test_get_with_buyer() {
        let (db, buyer_id) = setup().await;
        let repo = OrderRepository::new(db.pool());
        let order = repo.create(&NewOrder::new(buyer_id, 1.0)).await.unwrap();

        let view = repo.get_with_buyer(order.id).await.unwrap().unwrap();
        assert_eq!(view.order, order);
        assert_eq!(view.buyer.user_name, "alice");

        assert!(repo.get_with_buyer(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status() {
        let (db, buyer_id) = setup().await;
        let repo = OrderRepository::new(db.pool());
        let order = repo.create(&NewOrder::new(buyer_id, 1.0)).await.unwrap();

        let updated = repo
            .update(
                order.id,
                &OrderUpdate {
                    amount: 2.0,
                    status: OrderStatus::Paid,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(updated.amount, 2.0);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (db, buyer_id) = setup().await;
        let repo = OrderRepository::new(db.pool());
        let order = repo.create(&NewOrder::new(buyer_id, 1.0)).await.unwrap();
        repo.create(&NewOrder::new(buyer_id, 2.0)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert!(repo.delete(order.id).await.unwrap());
        assert!(!repo.delete(order.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_buyer_rejected() {
        let (db, _) = setup().await;
        let repo = OrderRepository::new(db.pool());

        let result = repo.create(&NewOrder::new(999, 1.0)).await;
        assert!(matches!(result, Err(DeliveryError::Validation(_))));
    }
}
