//! Authentication: token lifecycle, session gating, and the auth API façade.

pub mod guard;
pub mod jwt;
pub mod token_store;

use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{check, ApiError};
use self::token_store::TokenStore;

/// Registration payload expected by `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Credentials for `POST /auth/authenticate`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct AuthenticationResponse {
    token: String,
}

/// Façade over the auth endpoints. Collaborators are passed in explicitly;
/// the one piece of shared state it touches is the token store.
pub struct AuthClient {
    http: ClientWithMiddleware,
    base: String,
    store: Arc<TokenStore>,
}

impl AuthClient {
    pub fn new(http: ClientWithMiddleware, api_url: &str, store: Arc<TokenStore>) -> Self {
        Self {
            http,
            base: format!("{api_url}/auth"),
            store,
        }
    }

    /// Registers a new user. The locale rides along as a query parameter
    /// and drives the language of the activation email. Resolves with no
    /// payload; server errors propagate unmodified.
    pub async fn register(&self, payload: &RegisterRequest, locale: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(format!("{}/register", self.base))
            .query(&[("locale", locale)])
            .json(payload)
            .send()
            .await?;
        check(resp).await?;
        info!(email = %payload.email, "registration accepted");
        Ok(())
    }

    /// Authenticates and persists the returned token — the method's one
    /// side effect. On any failure the store is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(format!("{}/authenticate", self.base))
            .json(credentials)
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: AuthenticationResponse = resp.json().await?;
        self.store.set(&body.token).map_err(ApiError::Internal)?;
        info!(email = %credentials.email, "login succeeded, token stored");
        Ok(())
    }

    /// Sends the emailed activation code to the API. No token interaction.
    pub async fn confirm(&self, code: &str, locale: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .get(format!("{}/activate-account", self.base))
            .query(&[("code", code), ("locale", locale)])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Drops the local session. Purely local; no network call is issued.
    pub fn logout(&self) {
        self.store.clear();
        info!("logged out, token cleared");
    }

    /// True when a token is present and valid.
    pub fn is_authenticated(&self) -> bool {
        self.store.is_valid()
    }
}
