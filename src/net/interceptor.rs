//! Outbound bearer-token interceptor.
//!
//! Sits in the reqwest middleware chain and governs both directions:
//! 1. Outbound — requests targeting the API (prefix match on the configured
//!    base URL) that are not public get `Authorization: Bearer <token>`
//!    attached, but only when a token is present AND currently valid. An
//!    absent or invalid token forwards the request unmodified: the server
//!    is the enforcement point, the client never blocks.
//! 2. Inbound — any 401 response clears the token store, so the next
//!    validity check fails and the session gate redirects to login. The
//!    response itself passes through untouched.

use std::sync::Arc;

use http::Extensions;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use tracing::{debug, warn};

use crate::auth::token_store::TokenStore;

/// API paths reachable without a token. Matching is a substring test
/// against the full request URL — not a prefix or exact path match — so
/// query strings and the base-URL prefix never cause false negatives.
pub const PUBLIC_PATHS: [&str; 5] = [
    "/auth/register",
    "/auth/authenticate",
    "/auth/activate-account",
    "/auth/reset-password",
    "/auth/change-password",
];

pub struct BearerAuth {
    api_url: String,
    store: Arc<TokenStore>,
}

impl BearerAuth {
    pub fn new(api_url: impl Into<String>, store: Arc<TokenStore>) -> Self {
        Self {
            api_url: api_url.into(),
            store,
        }
    }

    /// Pure function of the request URL; session state plays no part in
    /// classification.
    fn is_public(url: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| url.contains(p))
    }
}

#[async_trait::async_trait]
impl Middleware for BearerAuth {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let url = req.url().as_str().to_string();
        let is_api_call = url.starts_with(&self.api_url);

        if is_api_call && !Self::is_public(&url) {
            // Both conditions re-derived per request: token present and,
            // separately, still valid (is_valid self-clears when not).
            if let Some(token) = self.store.get() {
                if self.store.is_valid() {
                    match HeaderValue::from_str(&format!("Bearer {token}")) {
                        Ok(value) => {
                            req.headers_mut().insert(AUTHORIZATION, value);
                        }
                        Err(e) => {
                            warn!(error = %e, "token not representable as header, sending without");
                        }
                    }
                }
            }
        }

        let resp = next.run(req, extensions).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            debug!(url = %url, "401 from API, clearing stored token");
            self.store.clear();
        }

        Ok(resp)
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_match_by_substring() {
        assert!(BearerAuth::is_public(
            "http://localhost:8080/api/v1/auth/authenticate"
        ));
        assert!(BearerAuth::is_public(
            "http://localhost:8080/api/v1/auth/activate-account?code=123456&locale=en"
        ));
        assert!(BearerAuth::is_public(
            "http://localhost:8080/api/v1/auth/register?locale=fr"
        ));
    }

    #[test]
    fn protected_paths_do_not_match() {
        assert!(!BearerAuth::is_public("http://localhost:8080/api/v1/products"));
        assert!(!BearerAuth::is_public(
            "http://localhost:8080/api/v1/products/42"
        ));
    }
}
