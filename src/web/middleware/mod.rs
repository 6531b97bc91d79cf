//! Middleware for Web API.

pub mod auth;
pub mod cors;

pub use auth::{
    authenticate, bearer_token, require_session, AuthUser, SessionRejection, SessionStage,
};
pub use cors::create_cors_layer;
