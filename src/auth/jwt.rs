//! Minimal JWT payload reading — expiry claim only.
//!
//! The client never verifies signatures: it holds no key material, and the
//! server re-validates every request anyway. All this module answers is
//! "when does this token claim to expire", so the session layer can avoid
//! sending tokens the server is guaranteed to reject.

use base64::Engine;

/// Extracts the `exp` claim (Unix timestamp) from a JWT.
///
/// A token that is not three dot-separated parts, whose payload is not
/// base64url/JSON, or that carries no numeric `exp` claim is malformed —
/// there is no "eternally valid" token.
pub fn expiry(token: &str) -> anyhow::Result<i64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow::anyhow!("invalid JWT format: expected 3 parts"));
    }

    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let payload_bytes = engine
        .decode(parts[1])
        .map_err(|e| anyhow::anyhow!("JWT payload decode error: {}", e))?;
    let claims: serde_json::Value = serde_json::from_slice(&payload_bytes)?;

    claims
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| anyhow::anyhow!("JWT missing 'exp' claim"))
}

/// True unless the token's expiry claim is strictly in the future (local
/// clock; skew is not compensated).
pub fn is_expired(token: &str) -> anyhow::Result<bool> {
    Ok(expiry(token)? <= chrono::Utc::now().timestamp())
}

// ── Tests ────────────────────────────────────────────────────
