//! Concurrency tests for the delivery backend.
//!
//! These tests verify that concurrent writers against one pool and
//! concurrent session traffic against one revocation registry stay
//! consistent.

use std::sync::Arc;

use delivery::auth::{RevocationRegistry, TokenError, TokenService};
use delivery::db::{NewUser, Role, UserRepository};
use delivery::order::{NewOrder, NewOrderItem, OrderItemRepository, OrderRepository};
use delivery::product::{NewProduct, ProductRepository};
use delivery::shop::{NewShop, ShopRepository};
use delivery::Database;

/// Setup a file-backed test database so the pool holds several connections.
async fn setup_test_db() -> (Arc<Database>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("market.db")).await.unwrap();
    (Arc::new(db), dir)
}

/// Create a test user and return the user ID.
async fn create_test_user(db: &Database, user_name: &str, role: Role) -> i64 {
    let user_repo = UserRepository::new(db.pool());
    let user = NewUser::new(user_name, format!("{}@x.com", user_name), "digest").with_role(role);
    user_repo.create(&user).await.unwrap().id
}

/// Concurrent order placement by many buyers.
#[tokio::test]
async fn test_concurrent_order_creation() {
    let (db, _dir) = setup_test_db().await;

    const NUM_BUYERS: usize = 10;
    let mut buyer_ids = Vec::new();
    for i in 0..NUM_BUYERS {
        buyer_ids.push(create_test_user(&db, &format!("buyer{}", i), Role::Buyer).await);
    }

    let mut handles = Vec::new();
    for buyer_id in buyer_ids {
        let db_clone = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            OrderRepository::new(db_clone.pool())
                .create(&NewOrder::new(buyer_id, 10.0))
                .await
        }));
    }

    let mut success_count = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            success_count += 1;
        }
    }
    assert_eq!(success_count, NUM_BUYERS, "All orders should be created");

    let orders = OrderRepository::new(db.pool()).list().await.unwrap();
    assert_eq!(orders.len(), NUM_BUYERS);
}

/// Concurrent item insertion into a single order.
#[tokio::test]
async fn test_concurrent_order_items() {
    let (db, _dir) = setup_test_db().await;

    let seller_id = create_test_user(&db, "seller", Role::Seller).await;
    let buyer_id = create_test_user(&db, "buyer", Role::Buyer).await;
    let shop = ShopRepository::new(db.pool())
        .create(&NewShop::new(seller_id, "Bakery"))
        .await
        .unwrap();
    let product = ProductRepository::new(db.pool())
        .create(&NewProduct::new(shop.id, "Bread", 2.0).with_stock(100))
        .await
        .unwrap();
    let order = OrderRepository::new(db.pool())
        .create(&NewOrder::new(buyer_id, 0.0))
        .await
        .unwrap();

    const NUM_ITEMS: usize = 8;
    let mut handles = Vec::new();
    for i in 0..NUM_ITEMS {
        let db_clone = Arc::clone(&db);
        let (order_id, product_id) = (order.id, product.id);
        handles.push(tokio::spawn(async move {
            OrderItemRepository::new(db_clone.pool())
                .create(&NewOrderItem::new(order_id, product_id, i as i64 + 1, 2.0))
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let items = OrderItemRepository::new(db.pool())
        .list(Some(order.id))
        .await
        .unwrap();
    assert_eq!(items.len(), NUM_ITEMS);
}

/// Logouts racing with verification on a shared registry.
///
/// Every revoked token must be rejected once its logout has returned, and
/// tokens never logged out must keep working.
#[tokio::test]
async fn test_concurrent_logout_and_verify() {
    let registry = Arc::new(RevocationRegistry::new());
    let service = Arc::new(TokenService::new("concurrency-secret", Arc::clone(&registry)));

    const NUM_SESSIONS: i64 = 32;
    let tokens: Vec<_> = (0..NUM_SESSIONS)
        .map(|id| service.issue_now(id).unwrap())
        .collect();

    let mut handles = Vec::new();
    for (i, issued) in tokens.iter().cloned().enumerate() {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                service.revocations().revoke(&issued.token, issued.expires_at);
                assert_eq!(service.verify(&issued.token), Err(TokenError::Revoked));
            } else {
                for _ in 0..10 {
                    assert!(service.verify(&issued.token).is_ok());
                    tokio::task::yield_now().await;
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(registry.len(), (NUM_SESSIONS / 2) as usize);
}
