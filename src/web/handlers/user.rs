//! User handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::db::{ProfilePatch, UserRepository};
use crate::web::dto::{ApiResponse, CompleteProfileRequest, UserResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// GET /api/users - List all users.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let users = UserRepository::new(state.db.pool()).list().await?;
    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// PUT /api/complete-profile - Fill in optional profile fields.
pub async fn complete_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CompleteProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let patch = ProfilePatch::from(req);

    let updated = UserRepository::new(state.db.pool())
        .complete_profile(user.id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = user.id, "Profile updated");
    Ok(Json(ApiResponse::new(updated.into())))
}
