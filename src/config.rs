use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the shop API, e.g. `http://localhost:8080/api/v1`.
    /// Stored without a trailing slash so the interceptor's prefix check
    /// against request URLs behaves predictably.
    pub api_url: String,
    /// File holding the bearer token between invocations.
    pub token_file: PathBuf,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let raw_url =
        std::env::var("SHOP_API_URL").unwrap_or_else(|_| "http://localhost:8080/api/v1".into());

    // Fail fast on an unparseable base URL rather than letting every
    // request die with a confusing transport message.
    let parsed = url::Url::parse(&raw_url)
        .map_err(|e| anyhow::anyhow!("SHOP_API_URL is not a valid URL ({}): {}", raw_url, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("SHOP_API_URL must be http or https, got: {}", raw_url);
    }

    let token_file = std::env::var("SHOP_TOKEN_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".shopctl").join("token")
        });

    Ok(Config {
        api_url: raw_url.trim_end_matches('/').to_string(),
        token_file,
    })
}
