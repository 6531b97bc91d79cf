//! Password hashing for the credential store.
//!
//! Digests are Argon2id PHC strings; the salt and cost parameters travel
//! inside the digest, so verification needs nothing but the stored string.

use argon2::{
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Hashing backend failure.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Stored digest could not be parsed.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Create the Argon2id hasher.
///
/// Memory cost 64 MiB, 3 iterations, 4 lanes.
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, None)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Enforces the length policy before hashing. Two calls with the same input
/// produce different digests.
///
/// # Examples
///
/// ```
/// use delivery::hash_password;
///
/// let hash = hash_password("secret123").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored digest.
///
/// A mismatch is `Ok(false)`, not an error. Only an unparsable digest or a
/// backend failure is reported as `Err`.
///
/// # Examples
///
/// ```
/// use delivery::{hash_password, verify_password};
///
/// let hash = hash_password("secret123").unwrap();
/// assert!(verify_password("secret123", &hash).unwrap());
/// assert!(!verify_password("secret124", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(PasswordError::HashError(e.to_string())),
    }
}

/// Validate the password length policy (8..=128 characters).
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password("secret123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
    }

    #[test]
    fn test_hash_password_different_hashes() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password").unwrap();
        assert!(verify_password("correct_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_mismatch_is_not_an_error() {
        let hash = hash_password("correct_password").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("any_password", "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_validate_password_bounds() {
        assert!(matches!(
            validate_password("short"),
            Err(PasswordError::TooShort)
        ));
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"a".repeat(128)).is_ok());
        assert!(matches!(
            validate_password(&"a".repeat(129)),
            Err(PasswordError::TooLong)
        ));
    }

    #[test]
    fn test_validate_password_counts_characters() {
        // 8 characters, more than 8 bytes
        assert!(validate_password("pässwörd").is_ok());
    }

    #[test]
    fn test_hash_password_rejects_policy_violation() {
        assert!(matches!(
            hash_password("short"),
            Err(PasswordError::TooShort)
        ));
    }

    #[test]
    fn test_password_with_special_chars() {
        let password = "p@$$w0rd!#$%^&*()";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_argon2_params() {
        let hash = hash_password("test_password").unwrap();

        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }
}
