//! Conduit HTTP Clients
//!
//! Typed HTTP clients used across the Conduit workspace:
//!
//! - [`JobServerClient`]: submits workflows to the remote job-execution
//!   server. It implements the [`Submitter`] trait the relay depends on.
//! - [`RelayClient`]: talks to the relay's own API; used by the CLI.
//!
//! # Example
//!
//! ```no_run
//! use conduit_client::{JobServerClient, Submitter};
//! use conduit_core::domain::credentials::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobServerClient::new();
//!     let outcome = client
//!         .submit(
//!             &Credentials::new("alice", "secret"),
//!             "jobs.example.org",
//!             8443,
//!             br#"{"query":"list"}"#.to_vec(),
//!         )
//!         .await?;
//!
//!     println!("return code: {}", outcome.return_code);
//!     Ok(())
//! }
//! ```

pub mod error;
mod job_server;
mod relay;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use job_server::{JobServerClient, Submitter};
pub use relay::RelayClient;

use serde::de::DeserializeOwned;

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response that returns no content
pub(crate) async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    Ok(())
}

/// Build an [`ClientError::ApiError`] from a failed response
///
/// JSON bodies of the form `{"error": "..."}` contribute their message;
/// anything else is used verbatim.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = serde_json::from_str::<serde_json::Value>(&error_text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(error_text);

    ClientError::api_error(status, message)
}
