//! Retrieval of the host's live OpenAPI document

use crate::{Result, ScalarKiotaError};
use async_trait::async_trait;
use std::time::Duration;

/// Path the host serves its OpenAPI document on
pub const SPEC_DOCUMENT_PATH: &str = "/openapi/v1.json";

/// Server URL used when the host reports no bound address
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Source of the current OpenAPI document
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Fetch the document body from the host at `server_url`
    async fn fetch(&self, server_url: &str) -> Result<String>;
}

/// Spec source backed by an HTTP GET against the host itself
#[derive(Debug, Clone)]
pub struct HttpSpecSource {
    client: reqwest::Client,
}

impl HttpSpecSource {
    /// Create a source with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ScalarKiotaError::validation(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Create a source around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpecSource for HttpSpecSource {
    async fn fetch(&self, server_url: &str) -> Result<String> {
        let url = spec_url(server_url);
        tracing::debug!(url = %url, "Downloading OpenAPI document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScalarKiotaError::spec_unavailable(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScalarKiotaError::spec_unavailable(
                &url,
                format!("server returned {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ScalarKiotaError::spec_unavailable(&url, e.to_string()))
    }
}

/// Full URL of the OpenAPI document on `server_url`
pub fn spec_url(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), SPEC_DOCUMENT_PATH)
}

/// Pick the server URL from the addresses the host bound, in order
pub fn resolve_server_url<S: AsRef<str>>(addresses: &[S]) -> String {
    addresses
        .first()
        .map(|address| address.as_ref().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}
