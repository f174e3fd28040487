//! Configuration for the ChatPPT MCP server.
//!
//! - `API_PPT_KEY`: bearer credential for the ChatPPT API (required).
//! - `CHATPPT_API_BASE`: base origin override (default `https://saas.api.yoo-ai.com`).

use crate::client::ApiError;

const DEFAULT_API_BASE: &str = "https://saas.api.yoo-ai.com";

/// ChatPPT API base origin. Uses env `CHATPPT_API_BASE` or the default.
pub fn api_base_url() -> String {
    std::env::var("CHATPPT_API_BASE")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Resolves the bearer credential. Checked on first use: an absent or empty
/// `API_PPT_KEY` is a configuration error raised before any network attempt.
pub fn api_key() -> Result<String, ApiError> {
    match std::env::var("API_PPT_KEY") {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::Configuration(
            "API_PPT_KEY environment variable is not set".to_string(),
        )),
    }
}
