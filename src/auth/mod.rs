//! Authentication module for the delivery backend.
//!
//! This module provides password hashing, session token issuance and
//! verification, and the logout revocation registry.

mod password;
mod revocation;
mod token;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use revocation::RevocationRegistry;
pub use token::{
    IssuedToken, TokenClaims, TokenError, TokenService, VerifiedToken, TOKEN_ISSUER,
    TOKEN_LIFETIME_SECS,
};
