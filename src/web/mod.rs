//! HTTP surface of the marketplace.
//!
//! Public routes cover registration, login and health. Everything under
//! `/api` runs behind the session middleware.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
