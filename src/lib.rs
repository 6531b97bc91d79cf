//! Delivery marketplace backend.
//!
//! A REST service where buyers and sellers register, log in with signed
//! session tokens, and manage shops, products, orders, order items and
//! ratings. Logout revokes a token for the rest of its lifetime.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod order;
pub mod product;
pub mod rating;
pub mod shop;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, PasswordError, RevocationRegistry,
    TokenError, TokenService,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository};
pub use error::{DeliveryError, Result};
pub use web::{create_router, AppState, WebServer};
