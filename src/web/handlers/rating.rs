//! Rating handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::order::OrderRepository;
use crate::rating::{NewRating, Rating, RatingRepository, RatingUpdate};
use crate::web::dto::{
    ApiResponse, CreateRatingRequest, MessageResponse, RatingListQuery, UpdateRatingRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::{parse_id, AppState};

/// Load a rating the caller wrote, or fail with 404 / 403.
async fn authored_rating(state: &AppState, id: i64, user_id: i64) -> Result<Rating, ApiError> {
    let rating = RatingRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rating not found"))?;

    if !rating.is_authored_by(user_id) {
        return Err(ApiError::forbidden("Not the author of this rating"));
    }
    Ok(rating)
}

/// POST /api/ratings - Rate a shop against one of the caller's orders.
pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRatingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Rating>>), ApiError> {
    let order = OrderRepository::new(state.db.pool())
        .get_by_id(req.order_id)
        .await?
        .ok_or_else(|| ApiError::unprocessable("Order does not exist"))?;
    if !order.is_owned_by(user.id) {
        return Err(ApiError::forbidden("Not the buyer of this order"));
    }

    let new_rating = NewRating {
        order_id: order.id,
        buyer_id: user.id,
        shop_id: req.shop_id,
        rating: req.rating,
        feedback: req.feedback,
    };
    let rating = RatingRepository::new(state.db.pool())
        .create(&new_rating)
        .await?;

    info!(rating_id = rating.id, shop_id = rating.shop_id, "Rating created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(rating))))
}

/// GET /api/ratings/:id
pub async fn get_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Rating>>, ApiError> {
    let id = parse_id(&id, "rating")?;
    let rating = RatingRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rating not found"))?;

    Ok(Json(ApiResponse::new(rating)))
}

/// GET /api/ratings?shop_id=
pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RatingListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Rating>>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid shop_id"))?;
    let ratings = RatingRepository::new(state.db.pool())
        .list(query.shop_id)
        .await?;
    Ok(Json(ApiResponse::new(ratings)))
}

/// PUT /api/ratings/:id - Author only.
pub async fn update_rating(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRatingRequest>,
) -> Result<Json<ApiResponse<Rating>>, ApiError> {
    let id = parse_id(&id, "rating")?;
    authored_rating(&state, id, user.id).await?;

    let update = RatingUpdate {
        rating: req.rating,
        feedback: req.feedback,
    };
    let rating = RatingRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Rating not found"))?;

    Ok(Json(ApiResponse::new(rating)))
}

/// DELETE /api/ratings/:id - Author only.
pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, "rating")?;
    authored_rating(&state, id, user.id).await?;

    if !RatingRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Rating not found"));
    }

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Rating deleted successfully",
    ))))
}
