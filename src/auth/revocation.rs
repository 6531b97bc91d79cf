//! Logout revocation registry.
//!
//! Process-local and in-memory: entries are lost on restart. Each entry keeps
//! the token's own expiry so the periodic purge can drop tokens that would be
//! rejected as expired anyway.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

/// Registry of token strings revoked before their natural expiry.
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: RwLock<HashMap<String, i64>>,
}

impl RevocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token as revoked.
    ///
    /// Idempotent. Returns true if the token was not already revoked.
    pub fn revoke(&self, token: &str, expires_at: i64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(token.to_string(), expires_at).is_none()
    }

    /// Check whether a token has been revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(token)
    }

    /// Drop entries whose token expired at or before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self, now: i64) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Purged expired revocations");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// Number of revoked tokens currently tracked.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_revoke_and_check() {
        let registry = RevocationRegistry::new();
        assert!(!registry.is_revoked("t1"));

        assert!(registry.revoke("t1", 100));
        assert!(registry.is_revoked("t1"));
        assert!(!registry.is_revoked("t2"));
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let registry = RevocationRegistry::new();

        assert!(registry.revoke("t1", 100));
        assert!(!registry.revoke("t1", 100));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_revoked("t1"));
    }

    #[test]
    fn test_purge_expired() {
        let registry = RevocationRegistry::new();
        registry.revoke("old", 100);
        registry.revoke("edge", 200);
        registry.revoke("fresh", 300);

        assert_eq!(registry.purge_expired(200), 2);
        assert!(!registry.is_revoked("old"));
        assert!(!registry.is_revoked("edge"));
        assert!(registry.is_revoked("fresh"));
    }

    #[test]
    fn test_clear() {
        let registry = RevocationRegistry::new();
        registry.revoke("a", 1);
        registry.revoke("b", 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_revoke_and_check() {
        let registry = Arc::new(RevocationRegistry::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let token = format!("token-{i}-{j}");
                    registry.revoke(&token, i64::MAX);
                    assert!(registry.is_revoked(&token));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 800);
    }
}
