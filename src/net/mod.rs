//! HTTP client assembly for talking to the shop API.

pub mod interceptor;

use std::sync::Arc;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::auth::token_store::TokenStore;
use self::interceptor::BearerAuth;

/// Builds the shared HTTP client with the bearer-token interceptor
/// installed. Every façade (auth, catalog) issues its calls through this
/// client, so token attachment and 401 handling are uniform.
///
/// Timeouts live here at the transport layer; the data-access layer does
/// not retry and does not time requests itself.
pub fn build_client(api_url: &str, store: Arc<TokenStore>) -> anyhow::Result<ClientWithMiddleware> {
    let reqwest_client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(5))
        .build()?;

    Ok(ClientBuilder::new(reqwest_client)
        .with(BearerAuth::new(api_url, store))
        .build())
}
