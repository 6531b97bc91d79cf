//! Product handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::product::{NewProduct, Product, ProductRepository, ProductUpdate};
use crate::shop::ShopRepository;
use crate::web::dto::{
    ApiResponse, CreateProductRequest, MessageResponse, ProductListQuery, UpdateProductRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{parse_id, AppState};

/// Check that the caller owns the shop listing product `id`.
async fn ensure_product_owner(state: &AppState, id: i64, user_id: i64) -> Result<(), ApiError> {
    let owner = ProductRepository::new(state.db.pool())
        .owner_of(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if owner != user_id {
        return Err(ApiError::forbidden("Not the owner of this product's shop"));
    }
    Ok(())
}

/// POST /api/product - List a product in one of the caller's shops.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), ApiError> {
    let shop = ShopRepository::new(state.db.pool())
        .get_by_id(req.shop_id)
        .await?
        .ok_or_else(|| ApiError::unprocessable("Shop does not exist"))?;
    if !shop.is_owned_by(user.id) {
        return Err(ApiError::forbidden("Not the owner of this shop"));
    }

    let new_product = NewProduct::new(shop.id, req.product_name, req.price)
        .with_description(req.description)
        .with_stock(req.stock);
    let product = ProductRepository::new(state.db.pool())
        .create(&new_product)
        .await?;

    info!(product_id = product.id, shop_id = shop.id, "Product created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(product))))
}

/// GET /api/product/:id
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let id = parse_id(&id, "product")?;
    let product = ProductRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ApiResponse::new(product)))
}

/// GET /api/product?shop_id=
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid shop_id"))?;
    let products = ProductRepository::new(state.db.pool())
        .list(query.shop_id)
        .await?;
    Ok(Json(ApiResponse::new(products)))
}

/// PUT /api/product/:id - Shop owner only.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let id = parse_id(&id, "product")?;
    ensure_product_owner(&state, id, user.id).await?;

    let update = ProductUpdate {
        product_name: req.product_name,
        description: req.description,
        price: req.price,
        stock: req.stock,
    };
    let product = ProductRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ApiResponse::new(product)))
}

/// DELETE /api/product/:id - Shop owner only.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, "product")?;
    ensure_product_owner(&state, id, user.id).await?;

    if !ProductRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Product deleted successfully",
    ))))
}
