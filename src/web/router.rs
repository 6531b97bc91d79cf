//! Router configuration for the marketplace API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    complete_profile, create_order, create_order_item, create_product, create_rating,
    create_shop, delete_order, delete_order_item, delete_product, delete_rating, delete_shop,
    get_order, get_order_item, get_product, get_rating, get_shop, list_order_items, list_orders,
    list_products, list_ratings, list_shops, list_users, login, logout, me, register,
    update_order, update_order_item, update_product, update_rating, update_shop, AppState,
};
use super::middleware::{create_cors_layer, require_session};

/// Create the main API router.
///
/// `/register`, `/login` and `/health` are public. Everything under `/api`
/// passes through [`require_session`] first.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/health", get(health_check));

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/complete-profile", put(complete_profile))
        .route("/shop", get(list_shops).post(create_shop))
        .route(
            "/shop/:id",
            get(get_shop).put(update_shop).delete(delete_shop),
        )
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/order", get(list_orders).post(create_order))
        .route(
            "/order/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route(
            "/orderitems",
            get(list_order_items).post(create_order_item),
        )
        .route(
            "/orderitems/:id",
            get(get_order_item)
                .put(update_order_item)
                .delete(delete_order_item),
        )
        .route("/ratings", get(list_ratings).post(create_rating))
        .route(
            "/ratings/:id",
            get(get_rating).put(update_rating).delete(delete_rating),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api", protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
