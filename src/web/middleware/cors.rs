//! CORS layer for browser clients.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Create a CORS layer from the configured origins.
///
/// With no usable origin every origin is allowed, without credentials.
/// Unparsable origins are skipped.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return CorsLayer::new()
            .allow_methods(METHODS)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(parsed)
}
