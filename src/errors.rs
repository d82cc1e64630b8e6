use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Structured error body returned by the shop API.
/// The server omits empty fields from the JSON, so everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub timestamp: Option<String>,
    pub path: Option<String>,
    /// Business error code, e.g. 304 for bad credentials.
    pub business_error_code: Option<i32>,
    /// Business description, e.g. "User account is locked".
    pub business_error_description: Option<String>,
    /// Specific error message for this failure.
    pub error: Option<String>,
    /// Field-level validation messages on 400 responses.
    pub validation_errors: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level or middleware failure. Surfaced unmodified; no retry.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response arrived but its body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] reqwest::Error),

    /// Non-2xx response, with the parsed error body when one was readable.
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        body: Option<ApiErrorBody>,
    },

    /// Client-local failure, e.g. the token file could not be written.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status of the failure, when the failure was an HTTP response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message with fixed precedence: the API's `error`
    /// field, then `businessErrorDescription`, then the generic
    /// transport/status message, then a fixed fallback.
    pub fn readable_message(&self) -> String {
        if let ApiError::Status { body: Some(b), .. } = self {
            if let Some(msg) = non_blank(b.error.as_deref()) {
                return msg;
            }
            if let Some(msg) = non_blank(b.business_error_description.as_deref()) {
                return msg;
            }
        }
        non_blank(Some(&self.to_string())).unwrap_or_else(|| "Unexpected error occurred".into())
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Turns a non-2xx response into `ApiError::Status`, parsing the structured
/// body on a best-effort basis (an unparseable body is simply dropped).
pub async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.json::<ApiErrorBody>().await.ok();
    Err(ApiError::Status { status, body })
}

// ── Tests ────────────────────────────────────────────────────
