//! Shared helpers for the web API tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use delivery::web::{create_router, AppState};
use delivery::Database;
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const TEST_PASSWORD: &str = "secret123";

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let state = Arc::new(AppState::new(db, TEST_SECRET));
    let router = create_router(Arc::clone(&state), &[]);

    let server = TestServer::new(router).expect("Failed to create test server");
    (server, state)
}

/// Register an account and return the response body.
pub async fn register(server: &TestServer, user_name: &str, email: &str, role: &str) -> Value {
    let response = server
        .post("/register")
        .json(&json!({
            "user_name": user_name,
            "email": email,
            "password": TEST_PASSWORD,
            "role": role
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the bearer token.
pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["data"]["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Register and log in, returning `(user id, token)`.
pub async fn signed_in(server: &TestServer, user_name: &str, role: &str) -> (i64, String) {
    let email = format!("{}@x.com", user_name);
    let body = register(server, user_name, &email, role).await;
    let id = body["data"]["id"].as_i64().expect("id missing");
    (id, login(server, &email).await)
}

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Name of the header carrying the bearer token.
pub const AUTH: axum::http::HeaderName = AUTHORIZATION;
