//! HTTP gateway for the ChatPPT API.
//!
//! Every tool reduces to one call here: GET with query parameters or POST with
//! form-encoded fields, bearer credential attached, per-operation timeout.
//! Failures are classified into [`ApiError`]; a successful body is returned as
//! parsed JSON without reshaping.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config;

/// Failure taxonomy for remote calls. Nothing is retried or recovered
/// internally; every failure surfaces as exactly one of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required credential missing; raised before any network attempt.
    #[error("configuration: {0}")]
    Configuration(String),

    /// Connection, DNS, or timeout failure from the transport layer.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP status outside the success range.
    #[error("remote service returned HTTP {code}")]
    Status { code: u16 },

    /// Body could not be parsed as the expected structured format.
    #[error("invalid response body: {0}")]
    Format(String),

    /// Query response carried a task status outside {1, 2, 3}.
    #[error("unrecognized task status {status}")]
    UnexpectedTaskState { status: i64 },
}

pub struct ChatpptClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatpptClient {
    /// Builds a client from env: `CHATPPT_API_BASE` and `API_PPT_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = config::api_key()?;
        Ok(Self::new(config::api_base_url(), api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    // The remote service has always received `Bearer` followed by two spaces
    // and tolerates exactly that; keep the byte sequence as-is.
    fn auth_header(&self) -> String {
        format!("Bearer  {}", self.api_key)
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", self.auth_header())
            .timeout(timeout)
            .send()
            .await?;
        Self::read_body(response).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .form(fields)
            .header("Authorization", self.auth_header())
            .timeout(timeout)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Format(source.to_string()))
    }
}
