//! Session middleware for protected routes.
//!
//! A request moves `NoAuth -> HeaderChecked -> TokenVerified ->
//! IdentityPropagated`. Failing any gate rejects it with 401 and the handler
//! never runs. Identity reaches handlers as a typed [`AuthUser`] extension.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::auth::{TokenError, TokenService};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Progress of a request through the session gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    /// Nothing checked yet.
    NoAuth,
    /// A bearer token was found in the `Authorization` header.
    HeaderChecked,
    /// The token passed revocation, signature, expiry and claims checks.
    TokenVerified,
    /// The identity was attached to the request.
    IdentityPropagated,
}

/// Why a request was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRejection {
    /// No `Authorization: Bearer <token>` header.
    MissingHeader,
    /// The token failed verification.
    Token(TokenError),
}

impl SessionRejection {
    /// Stage the request had reached when it was rejected.
    pub fn stage(&self) -> SessionStage {
        match self {
            SessionRejection::MissingHeader => SessionStage::NoAuth,
            SessionRejection::Token(_) => SessionStage::HeaderChecked,
        }
    }
}

impl From<SessionRejection> for ApiError {
    fn from(rejection: SessionRejection) -> Self {
        match rejection {
            SessionRejection::MissingHeader => ApiError::unauthorized("Missing authorization"),
            SessionRejection::Token(err) => err.into(),
        }
    }
}

/// Authenticated identity propagated to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Identity id from the token.
    pub id: i64,
    /// The presented token, kept so logout can revoke it.
    pub token: String,
    /// Token expiry (Unix seconds).
    pub expires_at: i64,
}

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Run the session gates against a request's headers as of `now`.
pub fn authenticate(
    tokens: &TokenService,
    headers: &HeaderMap,
    now: i64,
) -> Result<AuthUser, SessionRejection> {
    let token = bearer_token(headers).ok_or(SessionRejection::MissingHeader)?;

    let verified = tokens
        .verify_at(token, now)
        .map_err(SessionRejection::Token)?;

    Ok(AuthUser {
        id: verified.user_id,
        token: token.to_string(),
        expires_at: verified.expires_at,
    })
}

/// Middleware guarding every protected route.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let now = chrono::Utc::now().timestamp();

    match authenticate(&state.tokens, request.headers(), now) {
        Ok(user) => {
            debug!(
                user_id = user.id,
                stage = ?SessionStage::IdentityPropagated,
                "Session accepted"
            );
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(rejection) => {
            debug!(
                stage = ?rejection.stage(),
                reason = ?rejection,
                path = %request.uri().path(),
                "Session rejected"
            );
            ApiError::from(rejection).into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Missing authorization"))
    }
}
