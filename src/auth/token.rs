//! Session token issuance and verification.
//!
//! Tokens are HMAC-signed JWTs carrying the identity id, the issuer and an
//! expiry 24 hours after issuance. Verification runs the gates in a fixed
//! order: revocation, signing algorithm, signature, expiry, claims. Expiry is
//! checked once, against the caller-supplied clock, with `now < exp` as the
//! validity condition.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::revocation::RevocationRegistry;

/// Token lifetime (24 hours).
pub const TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Value of the `iss` claim.
pub const TOKEN_ISSUER: &str = "delivery app";

/// Signing algorithms accepted on verification.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Header `alg` names matching [`ACCEPTED_ALGORITHMS`].
const ACCEPTED_ALGORITHM_NAMES: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Token rejection reasons.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token was revoked by logout.
    #[error("token revoked or invalid")]
    Revoked,

    /// Header names an algorithm outside the HMAC family.
    #[error("unexpected signing method")]
    UnexpectedAlgorithm,

    /// Signature does not verify under the current secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// `now >= exp`.
    #[error("token expired")]
    Expired,

    /// Claims are missing or have the wrong type.
    #[error("invalid token claims")]
    InvalidClaims,

    /// Not a JWT at all.
    #[error("malformed token")]
    Malformed,

    /// Signing backend failure on issuance.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Claims minted on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity id.
    pub id: i64,
    /// Issuer.
    pub iss: String,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
    /// Issued at timestamp.
    pub iat: i64,
    /// Unique token id, so two logins in the same second differ.
    pub jti: String,
}

/// Claims as read back before the identity claim is trusted.
#[derive(Debug, Deserialize)]
struct UncheckedClaims {
    id: Option<serde_json::Value>,
    exp: i64,
}

/// Token header as written by the client, before `alg` is trusted.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Read the `alg` named in the first token segment.
///
/// The name is kept as a string so values jsonwebtoken has no variant for
/// (`none`, `HS999`) are still reported as an unexpected algorithm.
fn header_algorithm(token: &str) -> Result<String, TokenError> {
    let segment = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        debug!("Undecodable token header: {}", e);
        TokenError::Malformed
    })?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|e| {
        debug!("Unreadable token header: {}", e);
        TokenError::Malformed
    })?;
    Ok(header.alg)
}

/// A freshly minted token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: i64,
    pub expires_at: i64,
}

/// Issues and verifies session tokens with a single symmetric secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<RevocationRegistry>,
}

impl TokenService {
    /// Create a service from the startup secret and the shared registry.
    pub fn new(secret: &str, revocations: Arc<RevocationRegistry>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.set_issuer(&[TOKEN_ISSUER]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// The registry consulted on every verification.
    pub fn revocations(&self) -> &Arc<RevocationRegistry> {
        &self.revocations
    }

    /// Mint a token for `user_id` issued at `issued_at` (Unix seconds).
    pub fn issue(&self, user_id: i64, issued_at: i64) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims {
            id: user_id,
            iss: TOKEN_ISSUER.to_string(),
            exp: issued_at + TOKEN_LIFETIME_SECS,
            iat: issued_at,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Mint a token issued now.
    pub fn issue_now(&self, user_id: i64) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, chrono::Utc::now().timestamp())
    }

    /// Verify a token against the wall clock.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedToken, TokenError> {
        if self.revocations.is_revoked(token) {
            return Err(TokenError::Revoked);
        }

        let alg = header_algorithm(token)?;
        if !ACCEPTED_ALGORITHM_NAMES.contains(&alg.as_str()) {
            debug!(alg = %alg, "Token signed with unexpected algorithm");
            return Err(TokenError::UnexpectedAlgorithm);
        }

        let data = decode::<UncheckedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_decode_error(e.kind()))?;
        let claims = data.claims;

        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        let user_id = claims
            .id
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::InvalidClaims)?;

        Ok(VerifiedToken {
            user_id,
            expires_at: claims.exp,
        })
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnexpectedAlgorithm
        }
        ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) | ErrorKind::InvalidIssuer => {
            TokenError::InvalidClaims
        }
        other => {
            debug!("Token decode failed: {:?}", other);
            TokenError::Malformed
        }
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("revoked", &self.revocations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const T0: i64 = 1_700_000_000;

    fn service() -> TokenService {
        TokenService::new(SECRET, Arc::new(RevocationRegistry::new()))
    }

    fn sign_raw(claims: &serde_json::Value, alg: Algorithm) -> String {
        encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_sets_claims() {
        let svc = service();
        let issued = svc.issue(7, T0).unwrap();

        assert_eq!(issued.expires_at, T0 + TOKEN_LIFETIME_SECS);
        assert_eq!(issued.token.split('.').count(), 3);

        let payload = issued.token.split('.').nth(1).unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(claims["id"], 7);
        assert_eq!(claims["iss"], TOKEN_ISSUER);
        assert_eq!(claims["exp"], T0 + TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let svc = service();
        for id in [1, 42, i64::MAX] {
            let issued = svc.issue(id, T0).unwrap();
            let verified = svc.verify_at(&issued.token, T0).unwrap();
            assert_eq!(verified.user_id, id);
            assert_eq!(verified.expires_at, issued.expires_at);
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let svc = service();
        let a = svc.issue(1, T0).unwrap();
        let b = svc.issue(1, T0).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_expiry_boundary() {
        let svc = service();
        let issued = svc.issue(1, T0).unwrap();
        let exp = issued.expires_at;

        assert!(svc.verify_at(&issued.token, exp - 1).is_ok());
        assert_eq!(svc.verify_at(&issued.token, exp), Err(TokenError::Expired));
        assert_eq!(
            svc.verify_at(&issued.token, exp + 1),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_revoked_token_rejected() {
        let svc = service();
        let issued = svc.issue(1, T0).unwrap();

        svc.revocations().revoke(&issued.token, issued.expires_at);
        svc.revocations().revoke(&issued.token, issued.expires_at);

        assert_eq!(
            svc.verify_at(&issued.token, T0),
            Err(TokenError::Revoked)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let svc = service();
        let issued = svc.issue(1, T0).unwrap();

        let (head, sig) = issued.token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);

        assert_eq!(
            svc.verify_at(&tampered, T0),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let other = TokenService::new("other-secret", Arc::new(RevocationRegistry::new()));
        let issued = other.issue(1, T0).unwrap();

        assert_eq!(
            service().verify_at(&issued.token, T0),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_rsa_header_rejected_before_claims() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        // Claims deliberately lack `id`
        let claims = URL_SAFE_NO_PAD.encode(r#"{"iss":"delivery app","exp":9999999999}"#);
        let token = format!("{header}.{claims}.c2lnbmF0dXJl");

        assert_eq!(
            service().verify_at(&token, T0),
            Err(TokenError::UnexpectedAlgorithm)
        );
    }

    #[test]
    fn test_unknown_algorithm_names_rejected() {
        let claims = URL_SAFE_NO_PAD.encode(r#"{"id":1,"iss":"delivery app","exp":9999999999}"#);

        for alg in ["none", "None", "HS999"] {
            let header = URL_SAFE_NO_PAD.encode(format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#));
            let token = format!("{header}.{claims}.");

            assert_eq!(
                service().verify_at(&token, T0),
                Err(TokenError::UnexpectedAlgorithm),
                "alg {alg}"
            );
        }
    }

    #[test]
    fn test_header_without_alg_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(r#"{"id":1,"iss":"delivery app","exp":9999999999}"#);

        assert_eq!(
            service().verify_at(&format!("{header}.{claims}.c2ln"), T0),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_other_hmac_algorithms_accepted() {
        let claims = serde_json::json!({
            "id": 5, "iss": TOKEN_ISSUER, "exp": T0 + 10, "iat": T0, "jti": "x"
        });
        let token = sign_raw(&claims, Algorithm::HS512);

        assert_eq!(service().verify_at(&token, T0).unwrap().user_id, 5);
    }

    #[test]
    fn test_missing_id_claim() {
        let claims = serde_json::json!({ "iss": TOKEN_ISSUER, "exp": T0 + 10 });
        let token = sign_raw(&claims, Algorithm::HS256);

        assert_eq!(
            service().verify_at(&token, T0),
            Err(TokenError::InvalidClaims)
        );
    }

    #[test]
    fn test_non_integer_id_claim() {
        let claims = serde_json::json!({ "id": "7", "iss": TOKEN_ISSUER, "exp": T0 + 10 });
        let token = sign_raw(&claims, Algorithm::HS256);

        assert_eq!(
            service().verify_at(&token, T0),
            Err(TokenError::InvalidClaims)
        );
    }

    #[test]
    fn test_expiry_checked_before_claims() {
        let claims = serde_json::json!({ "iss": TOKEN_ISSUER, "exp": T0 - 10 });
        let token = sign_raw(&claims, Algorithm::HS256);

        assert_eq!(service().verify_at(&token, T0), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_issuer() {
        let claims = serde_json::json!({ "id": 1, "iss": "someone else", "exp": T0 + 10 });
        let token = sign_raw(&claims, Algorithm::HS256);

        assert_eq!(
            service().verify_at(&token, T0),
            Err(TokenError::InvalidClaims)
        );
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(
            service().verify_at("not-a-token", T0),
            Err(TokenError::Malformed)
        );
    }
}
