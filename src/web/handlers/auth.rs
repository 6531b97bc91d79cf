//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, warn};

use crate::auth::{hash_password, verify_password, PasswordError, RevocationRegistry, TokenService};
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Token issuer and verifier.
    pub tokens: Arc<TokenService>,
    /// Logout revocation registry (shared with `tokens`).
    pub revocations: Arc<RevocationRegistry>,
}

impl AppState {
    /// Create a new application state with an empty revocation registry.
    pub fn new(db: Database, jwt_secret: &str) -> Self {
        let revocations = Arc::new(RevocationRegistry::new());
        let tokens = Arc::new(TokenService::new(jwt_secret, Arc::clone(&revocations)));
        Self {
            db,
            tokens,
            revocations,
        }
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

fn password_error(err: PasswordError) -> ApiError {
    match err {
        PasswordError::TooShort | PasswordError::TooLong => ApiError::unprocessable(err.to_string()),
        PasswordError::HashError(_) | PasswordError::InvalidHash => {
            error!("Password hashing failed: {}", err);
            ApiError::internal("An internal error occurred")
        }
    }
}

/// POST /register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let password = req.password;
    let digest = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!("Hashing task failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?
        .map_err(password_error)?;

    let new_user = NewUser::new(req.user_name, req.email, digest).with_role(req.role.unwrap_or_default());
    let user = UserRepository::new(state.db.pool())
        .create(&new_user)
        .await?;

    info!(user_id = user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// POST /login - Exchange email and password for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = UserRepository::new(state.db.pool())
        .get_by_email(&req.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password = req.password;
    let digest = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| {
            error!("Verification task failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?
        .map_err(password_error)?;

    if !matches {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let issued = state.tokens.issue_now(user.id)?;
    info!(user_id = user.id, "User logged in");

    Ok(Json(ApiResponse::new(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.into(),
    })))
}

/// POST /api/logout - Revoke the presented token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Json<ApiResponse<MessageResponse>> {
    state.revocations.revoke(&user.token, user.expires_at);
    info!(user_id = user.id, "User logged out");

    Json(ApiResponse::new(MessageResponse::new("Logged out successfully")))
}

/// GET /api/me - The authenticated user's record.
pub async fn me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let record = UserRepository::new(state.db.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(record.into())))
}
