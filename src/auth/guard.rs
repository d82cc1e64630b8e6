//! Pre-navigation session gate for the protected command subtree.

use std::sync::Arc;

use tracing::debug;

use crate::auth::token_store::TokenStore;

/// Route into the auth subtree where a denied user should be sent.
pub const LOGIN_ROUTE: &str = "auth/login";

/// Outcome of a gate evaluation. Denial carries the redirect target so the
/// caller performs the navigation exactly once per evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    Denied { redirect_to: String },
}

/// Stateless predicate over the token store. Every evaluation re-derives
/// validity from the stored token; nothing is remembered between checks.
pub struct SessionGate {
    store: Arc<TokenStore>,
}

impl SessionGate {
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    pub fn check(&self) -> RouteAccess {
        if self.store.is_invalid() {
            debug!(redirect_to = LOGIN_ROUTE, "session gate denied navigation");
            return RouteAccess::Denied {
                redirect_to: LOGIN_ROUTE.to_string(),
            };
        }
        RouteAccess::Granted
    }
}

// ── Tests ────────────────────────────────────────────────────
