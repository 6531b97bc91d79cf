//! Order handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::order::{NewOrder, Order, OrderRepository, OrderUpdate, OrderWithBuyer};
use crate::web::dto::{
    ApiResponse, CreateOrderRequest, MessageResponse, UpdateOrderRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{parse_id, AppState};

/// Load an order the caller placed, or fail with 404 / 403.
async fn owned_order(state: &AppState, id: i64, user_id: i64) -> Result<Order, ApiError> {
    let order = OrderRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    if !order.is_owned_by(user_id) {
        return Err(ApiError::forbidden("Not the buyer of this order"));
    }
    Ok(order)
}

/// POST /api/order - Place an order as the caller.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), ApiError> {
    let order = OrderRepository::new(state.db.pool())
        .create(&NewOrder::new(user.id, req.amount))
        .await?;

    info!(order_id = order.id, buyer_id = user.id, "Order created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(order))))
}

/// GET /api/order/:id - Order with its buyer.
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OrderWithBuyer>>, ApiError> {
    let id = parse_id(&id, "order")?;
    let order = OrderRepository::new(state.db.pool())
        .get_with_buyer(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    Ok(Json(ApiResponse::new(order)))
}

/// GET /api/order
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Order>>>, ApiError> {
    let orders = OrderRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(orders)))
}

/// PUT /api/order/:id - Change amount or status. Buyer only.
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<Order>>, ApiError> {
    let id = parse_id(&id, "order")?;
    owned_order(&state, id, user.id).await?;

    let update = OrderUpdate {
        amount: req.amount,
        status: req.status,
    };
    let order = OrderRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    info!(order_id = id, status = %order.status, "Order updated");
    Ok(Json(ApiResponse::new(order)))
}

/// DELETE /api/order/:id - Buyer only.
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, "order")?;
    owned_order(&state, id, user.id).await?;

    if !OrderRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Order not found"));
    }

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Order deleted successfully",
    ))))
}
