//! Relay API client

use conduit_core::dto::submit::{SubmitRequest, SubmitResponse};
use reqwest::Client;

use crate::error::Result;
use crate::{handle_empty_response, handle_response};

/// HTTP client for the Conduit relay API
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// Base URL of the relay (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl RelayClient {
    /// Create a new relay client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the relay (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new relay client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the relay
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a workflow through the relay
    ///
    /// # Arguments
    /// * `req` - Credentials, payload and its encoding
    ///
    /// # Returns
    /// The job id (on success), response payload and return code. A
    /// non-zero return code is returned as `Ok`.
    pub async fn submit(&self, req: &SubmitRequest) -> Result<SubmitResponse> {
        let url = format!("{}/api/submit", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        handle_response(response).await
    }

    /// Check that the relay is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        handle_empty_response(response).await
    }
}
