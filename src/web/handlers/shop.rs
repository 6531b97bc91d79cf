//! Shop handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::db::UserRepository;
use crate::shop::{NewShop, Shop, ShopRepository, ShopUpdate, ShopWithSeller};
use crate::web::dto::{ApiResponse, MessageResponse, ShopRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{parse_id, AppState};

/// Load a shop the caller owns, or fail with 404 / 403.
async fn owned_shop(state: &AppState, id: i64, user_id: i64) -> Result<Shop, ApiError> {
    let shop = ShopRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Shop not found"))?;

    if !shop.is_owned_by(user_id) {
        return Err(ApiError::forbidden("Not the owner of this shop"));
    }
    Ok(shop)
}

/// POST /api/shop - Open a shop. Sellers only.
pub async fn create_shop(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<ShopRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Shop>>), ApiError> {
    let caller = UserRepository::new(state.db.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    if !caller.is_seller() {
        return Err(ApiError::forbidden("Only sellers can open shops"));
    }

    let new_shop = NewShop::new(user.id, req.shop_name)
        .with_description(req.shop_description)
        .with_address(req.shop_address);
    let shop = ShopRepository::new(state.db.pool()).create(&new_shop).await?;

    info!(shop_id = shop.id, seller_id = user.id, "Shop created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(shop))))
}

/// GET /api/shop/:id - Shop with its seller.
pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ShopWithSeller>>, ApiError> {
    let id = parse_id(&id, "shop")?;
    let shop = ShopRepository::new(state.db.pool())
        .get_with_seller(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Shop not found"))?;

    Ok(Json(ApiResponse::new(shop)))
}

/// GET /api/shop - All shops.
pub async fn list_shops(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Shop>>>, ApiError> {
    let shops = ShopRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(shops)))
}

/// PUT /api/shop/:id - Edit a shop. Owner only.
pub async fn update_shop(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ShopRequest>,
) -> Result<Json<ApiResponse<Shop>>, ApiError> {
    let id = parse_id(&id, "shop")?;
    owned_shop(&state, id, user.id).await?;

    let update = ShopUpdate {
        shop_name: req.shop_name,
        shop_description: req.shop_description,
        shop_address: req.shop_address,
    };
    let shop = ShopRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Shop not found"))?;

    Ok(Json(ApiResponse::new(shop)))
}

/// DELETE /api/shop/:id - Close a shop. Owner only.
pub async fn delete_shop(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, "shop")?;
    owned_shop(&state, id, user.id).await?;

    if !ShopRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Shop not found"));
    }

    info!(shop_id = id, "Shop deleted");
    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Shop deleted successfully",
    ))))
}
