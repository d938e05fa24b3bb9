//! reqwest-backed explorer API client

use crate::api::ExplorerApi;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::time::Duration;
use tracing::debug;

/// Characters left unescaped in query values, matching form-urlencoding
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Join the base URL and endpoint, appending `params` as a query string.
///
/// Parameters keep their order; the `?` is only added when there are any.
pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    if !params.is_empty() {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// HTTP client for a single explorer base URL
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns `ApiError::Setup` if the underlying client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl ExplorerApi for HttpClient {
    async fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> ApiResult<serde_json::Value> {
        let url = build_url(&self.base_url, endpoint, params);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_error_body(status.as_u16(), &body));
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
