//! Persistent slot for the session's bearer token.
//!
//! One token at a time, stored as a plain string in a file at a fixed path —
//! the CLI's equivalent of the browser's single localStorage key. Validity
//! is recomputed from the token itself on every check; nothing is cached,
//! so a consumer can never act on a stale answer.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::auth::jwt;

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persists the token, overwriting any previous value. The contents are
    /// not inspected at write time; validity is the reader's concern.
    pub fn set(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Returns the persisted token, or `None` if never set or cleared.
    /// Read failures are logged and read as absence.
    pub fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read token file");
                None
            }
        }
    }

    /// Removes the persisted token. Clearing an absent token is a no-op.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "token cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to clear token file");
            }
        }
    }

    /// True when a token is present, decodes, and its expiry claim is in
    /// the future. A malformed or expired token is cleared on the spot so
    /// it cannot linger and be retried.
    pub fn is_valid(&self) -> bool {
        let Some(token) = self.get() else {
            return false;
        };
        match jwt::is_expired(&token) {
            Ok(false) => true,
            Ok(true) => {
                debug!("stored token is expired, clearing");
                self.clear();
                false
            }
            Err(e) => {
                warn!(error = %e, "stored token is malformed, clearing");
                self.clear();
                false
            }
        }
    }

    /// Negation of [`is_valid`](Self::is_valid), convenient for gate
    /// predicates.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn temp_store() -> TokenStore {
        let path = std::env::temp_dir()
            .join(format!("shopctl-test-{}", uuid::Uuid::new_v4()))
            .join("token");
        TokenStore::new(path)
    }

    fn make_token(payload: &str) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"HS256"}"#);
        format!("{}.{}.sig", header, engine.encode(payload))
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = temp_store();
        store.set("abc.def.ghi").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn set_overwrites_previous_token() {
        let store = temp_store();
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn get_returns_none_when_never_set() {
        let store = temp_store();
        assert!(store.get().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store();
        store.clear();
        store.set("tok").unwrap();
        store.clear();
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn valid_token_stays_stored() {
        let store = temp_store();
        let token = make_token(r#"{"exp":9999999999}"#);
        store.set(&token).unwrap();
        assert!(store.is_valid());
        assert!(!store.is_invalid());
        // No clearing side effect for a valid token.
        assert_eq!(store.get(), Some(token));
    }

    #[test]
    fn expired_token_is_invalid_and_self_cleared() {
        let store = temp_store();
        store.set(&make_token(r#"{"exp":1000000000}"#)).unwrap();
        assert!(!store.is_valid());
        assert!(store.get().is_none());
    }

    #[test]
    fn malformed_token_is_invalid_and_self_cleared() {
        let store = temp_store();
        store.set("garbage").unwrap();
        assert!(store.is_invalid());
        assert!(store.get().is_none());
    }

    #[test]
    fn token_without_exp_is_treated_as_malformed() {
        let store = temp_store();
        store.set(&make_token(r#"{"sub":"admin@admin.com"}"#)).unwrap();
        assert!(!store.is_valid());
        assert!(store.get().is_none());
    }

    #[test]
    fn missing_token_is_invalid_without_error() {
        let store = temp_store();
        assert!(!store.is_valid());
        assert!(store.is_invalid());
    }
}
