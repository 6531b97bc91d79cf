//! Order item handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::order::{
    NewOrderItem, OrderItem, OrderItemDetail, OrderItemRepository, OrderItemUpdate,
    OrderRepository,
};
use crate::web::dto::{
    ApiResponse, CreateOrderItemRequest, MessageResponse, OrderItemListQuery,
    UpdateOrderItemRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{parse_id, AppState};

/// Check that the caller placed the order containing item `id`.
async fn ensure_item_owner(state: &AppState, id: i64, user_id: i64) -> Result<(), ApiError> {
    let owner = OrderItemRepository::new(state.db.pool())
        .owner_of(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order item not found"))?;

    if owner != user_id {
        return Err(ApiError::forbidden("Not the buyer of this order"));
    }
    Ok(())
}

/// POST /api/orderitems - Add an item to one of the caller's orders.
pub async fn create_order_item(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderItem>>), ApiError> {
    let order = OrderRepository::new(state.db.pool())
        .get_by_id(req.order_id)
        .await?
        .ok_or_else(|| ApiError::unprocessable("Order does not exist"))?;
    if !order.is_owned_by(user.id) {
        return Err(ApiError::forbidden("Not the buyer of this order"));
    }

    let item = OrderItemRepository::new(state.db.pool())
        .create(&NewOrderItem::new(
            order.id,
            req.product_id,
            req.quantity,
            req.price,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(item))))
}

/// GET /api/orderitems/:id - Item with its order and product.
pub async fn get_order_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OrderItemDetail>>, ApiError> {
    let id = parse_id(&id, "order item")?;
    let item = OrderItemRepository::new(state.db.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order item not found"))?;

    Ok(Json(ApiResponse::new(item)))
}

/// GET /api/orderitems?order_id=
pub async fn list_order_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OrderItemListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<OrderItem>>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid order_id"))?;
    let items = OrderItemRepository::new(state.db.pool())
        .list(query.order_id)
        .await?;
    Ok(Json(ApiResponse::new(items)))
}

/// PUT /api/orderitems/:id - Order owner only.
pub async fn update_order_item(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateOrderItemRequest>,
) -> Result<Json<ApiResponse<OrderItem>>, ApiError> {
    let id = parse_id(&id, "order item")?;
    ensure_item_owner(&state, id, user.id).await?;

    let update = OrderItemUpdate {
        quantity: req.quantity,
        price: req.price,
    };
    let item = OrderItemRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Order item not found"))?;

    Ok(Json(ApiResponse::new(item)))
}

/// DELETE /api/orderitems/:id - Order owner only.
pub async fn delete_order_item(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, "order item")?;
    ensure_item_owner(&state, id, user.id).await?;

    if !OrderItemRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Order item not found"));
    }

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Order item deleted successfully",
    ))))
}
