//! Job server submission client

use async_trait::async_trait;
use conduit_core::domain::credentials::Credentials;
use conduit_core::dto::job_server::{JobServerReply, SubmitOutcome};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::handle_response;

/// Submits a workflow to a job-execution server
///
/// This is the seam between the relay and whatever actually talks to the
/// job server. Retries and timeouts, if any, belong to the implementation.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit a decoded workflow body on behalf of `credentials`
    ///
    /// # Arguments
    /// * `credentials` - The caller's username and password
    /// * `host` - Job server host name or address
    /// * `port` - Job server port
    /// * `body` - The workflow request bytes (already decoded)
    ///
    /// # Returns
    /// The server's reply as a named record. A non-zero `return_code` is a
    /// normal outcome, not an error.
    async fn submit(
        &self,
        credentials: &Credentials,
        host: &str,
        port: u16,
        body: Vec<u8>,
    ) -> Result<SubmitOutcome>;
}

/// HTTP implementation of [`Submitter`]
///
/// Posts the workflow to `{scheme}://{host}:{port}/api/jobs/submit` with
/// HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct JobServerClient {
    /// URL scheme, "http" or "https"
    scheme: String,
    /// HTTP client instance
    client: Client,
}

impl JobServerClient {
    /// Create a plain-HTTP client with default reqwest settings
    pub fn new() -> Self {
        Self::with_client("http", Client::new())
    }

    /// Create a client with a custom scheme and HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use conduit_client::JobServerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobServerClient::with_client("https", http_client);
    /// assert_eq!(client.scheme(), "https");
    /// ```
    pub fn with_client(scheme: impl Into<String>, client: Client) -> Self {
        Self {
            scheme: scheme.into(),
            client,
        }
    }

    /// Get the URL scheme used for submissions
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Build the submission URL for a target
    pub fn submit_url(&self, host: &str, port: u16) -> String {
        // Bare IPv6 literals need brackets inside a URL authority
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}/api/jobs/submit", self.scheme, host, port)
        } else {
            format!("{}://{}:{}/api/jobs/submit", self.scheme, host, port)
        }
    }
}

impl Default for JobServerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Submitter for JobServerClient {
    async fn submit(
        &self,
        credentials: &Credentials,
        host: &str,
        port: u16,
        body: Vec<u8>,
    ) -> Result<SubmitOutcome> {
        if host.is_empty() {
            return Err(ClientError::InvalidRequest(
                "job server host is empty".to_string(),
            ));
        }

        let url = self.submit_url(host, port);
        debug!(
            "Submitting {} byte(s) to {} as {}",
            body.len(),
            url,
            credentials.username
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let reply: JobServerReply = handle_response(response).await?;

        debug!(
            "Job server replied: return_code={}, job_id={:?}, session={}",
            reply.return_code, reply.job_id, reply.session
        );

        Ok(reply.into())
    }
}
