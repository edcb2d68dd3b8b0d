//! Relay Service
//!
//! Forwards a workflow submission to the configured job server and shapes
//! the reply into a [`SubmissionResult`].
//!
//! Every call runs the same linear pass:
//! validate → decode → delegate → re-encode → return.
//! There is no retry, no caching and no state shared between calls.

use std::sync::Arc;

use conduit_client::{ClientError, Submitter};
use conduit_core::codec::{self, CodecError};
use conduit_core::domain::submission::{PayloadEncoding, SubmissionRequest, SubmissionResult};
use conduit_core::dto::job_server::SubmitOutcome;
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Service error type
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing username or password
    #[error("{0}")]
    Validation(String),
    /// Payload declared as base64 is not valid base64
    #[error("{0}")]
    Decode(#[source] CodecError),
    /// The submission call itself failed
    #[error("job server call failed: {0}")]
    Transport(#[source] ClientError),
}

/// Fixed job server address the relay forwards to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobServerTarget {
    pub host: String,
    pub port: u16,
}

/// Submission relay
pub struct RelayService {
    submitter: Arc<dyn Submitter>,
    target: JobServerTarget,
}

impl RelayService {
    pub fn new(submitter: Arc<dyn Submitter>, target: JobServerTarget) -> Self {
        Self { submitter, target }
    }

    pub fn target(&self) -> &JobServerTarget {
        &self.target
    }

    /// Relay one submission to the job server
    ///
    /// Malformed base64 input fails before the job server is contacted.
    /// A non-zero return code from the job server is returned as `Ok`
    /// with `job_id` cleared.
    pub async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionResult, RelayError> {
        let span = info_span!(
            "relay",
            request_id = %Uuid::new_v4(),
            user = %request.username,
            encoding = %request.encoding,
        );

        self.relay(request).instrument(span).await
    }

    async fn relay(&self, request: SubmissionRequest) -> Result<SubmissionResult, RelayError> {
        validate_request(&request)?;

        let body = codec::decode(&request.payload, request.encoding).map_err(|e| {
            warn!("Rejecting submission: {}", e);
            RelayError::Decode(e)
        })?;

        debug!(
            "Forwarding {} byte(s) to {}:{}",
            body.len(),
            self.target.host,
            self.target.port
        );

        let outcome = self
            .submitter
            .submit(
                &request.credentials(),
                &self.target.host,
                self.target.port,
                body,
            )
            .await
            .map_err(|e| {
                error!("Job server call failed: {}", e);
                RelayError::Transport(e)
            })?;

        let result = shape_result(outcome, request.encoding);

        if result.is_success() {
            if result.job_id.is_none() {
                warn!("Job server reported success without a job id");
            }
            info!("Submission accepted: job_id={:?}", result.job_id);
        } else {
            info!("Submission failed with return code {}", result.return_code);
        }

        Ok(result)
    }
}

// =============================================================================
// Validation & Shaping
// =============================================================================

fn validate_request(request: &SubmissionRequest) -> Result<(), RelayError> {
    if request.username.is_empty() {
        return Err(RelayError::Validation("username is required".to_string()));
    }

    if request.password.is_empty() {
        return Err(RelayError::Validation("password is required".to_string()));
    }

    Ok(())
}

/// Map the job server's reply onto the relay's output slots
///
/// Only a successful, non-empty reply is re-encoded; diagnostics from a
/// failed submission are passed through untouched.
fn shape_result(outcome: SubmitOutcome, encoding: PayloadEncoding) -> SubmissionResult {
    let SubmitOutcome {
        response,
        job_id,
        return_code,
        ..
    } = outcome;

    if return_code != 0 {
        return SubmissionResult {
            job_id: None,
            payload: response,
            return_code,
        };
    }

    let payload = if response.is_empty() {
        response
    } else {
        codec::encode(&response, encoding)
    };

    SubmissionResult {
        job_id,
        payload,
        return_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeSubmitter, closed_port};
    use conduit_client::JobServerClient;
    use conduit_core::domain::credentials::Credentials;

    fn target() -> JobServerTarget {
        JobServerTarget {
            host: "jobs.internal".to_string(),
            port: 8443,
        }
    }

    fn relay_with(submitter: Arc<FakeSubmitter>) -> RelayService {
        RelayService::new(submitter, target())
    }

    #[tokio::test]
    async fn test_base64_round_trip_scenario() {
        let fake = FakeSubmitter::replying(b"OK", Some("123"), 0);
        let relay = relay_with(fake.clone());

        // base64 of {"query":"list"}
        let request = SubmissionRequest::new(
            "alice",
            "secret",
            b"eyJxdWVyeSI6Imxpc3QifQ==".to_vec(),
            PayloadEncoding::Base64,
        );

        let result = relay.submit(request).await.unwrap();
        assert_eq!(
            result,
            SubmissionResult {
                job_id: Some("123".to_string()),
                payload: b"T0s=".to_vec(),
                return_code: 0,
            }
        );

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body, b"{\"query\":\"list\"}".to_vec());
        assert_eq!(calls[0].credentials, Credentials::new("alice", "secret"));
        assert_eq!(calls[0].host, "jobs.internal");
        assert_eq!(calls[0].port, 8443);
    }

    #[tokio::test]
    async fn test_plain_payload_passes_through_unmodified() {
        let reply = b"status: queued\n\x00\xff".to_vec();
        let fake = FakeSubmitter::replying(&reply, Some("9"), 0);
        let relay = relay_with(fake.clone());

        let request =
            SubmissionRequest::new("alice", "secret", b"{}".to_vec(), PayloadEncoding::Plain);
        let result = relay.submit(request).await.unwrap();

        assert_eq!(result.payload, reply);
        assert_eq!(result.job_id.as_deref(), Some("9"));
        assert_eq!(fake.calls()[0].body, b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_failure_clears_job_id_and_keeps_diagnostics() {
        let fake = FakeSubmitter::replying(b"quota exceeded", Some("stale-id"), 4);
        let relay = relay_with(fake);

        let request = SubmissionRequest::new(
            "alice",
            "secret",
            b"e30=".to_vec(),
            PayloadEncoding::Base64,
        );
        let result = relay.submit(request).await.unwrap();

        assert_eq!(result.return_code, 4);
        assert!(result.job_id.is_none());
        // Diagnostics are never re-encoded
        assert_eq!(result.payload, b"quota exceeded".to_vec());
    }

    #[tokio::test]
    async fn test_empty_success_payload_not_encoded() {
        let fake = FakeSubmitter::replying(b"", Some("7"), 0);
        let relay = relay_with(fake);

        let request = SubmissionRequest::new(
            "alice",
            "secret",
            b"e30=".to_vec(),
            PayloadEncoding::Base64,
        );
        let result = relay.submit(request).await.unwrap();

        assert!(result.payload.is_empty());
        assert_eq!(result.job_id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_success_without_job_id_is_passed_through() {
        let fake = FakeSubmitter::replying(b"OK", None, 0);
        let relay = relay_with(fake.clone());

        let request = SubmissionRequest::new(
            "alice",
            "secret",
            b"e30=".to_vec(),
            PayloadEncoding::Base64,
        );
        let result = relay.submit(request).await.unwrap();

        assert_eq!(result.return_code, 0);
        assert!(result.job_id.is_none());
        assert_eq!(result.payload, b"T0s=".to_vec());
        assert_eq!(fake.calls()[0].body, b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_malformed_base64_never_reaches_job_server() {
        let fake = FakeSubmitter::replying(b"OK", Some("1"), 0);
        let relay = relay_with(fake.clone());

        let request = SubmissionRequest::new(
            "alice",
            "secret",
            b"{not base64}".to_vec(),
            PayloadEncoding::Base64,
        );
        let err = relay.submit(request).await.unwrap_err();

        assert!(matches!(err, RelayError::Decode(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let fake = FakeSubmitter::replying(b"OK", Some("1"), 0);
        let relay = relay_with(fake.clone());

        let request = SubmissionRequest::new("", "secret", b"{}".to_vec(), PayloadEncoding::Plain);
        assert!(matches!(
            relay.submit(request).await.unwrap_err(),
            RelayError::Validation(_)
        ));

        let request = SubmissionRequest::new("alice", "", b"{}".to_vec(), PayloadEncoding::Plain);
        assert!(matches!(
            relay.submit(request).await.unwrap_err(),
            RelayError::Validation(_)
        ));

        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_connectivity_error_propagates_as_transport() {
        let port = closed_port().await;
        let relay = RelayService::new(
            Arc::new(JobServerClient::new()),
            JobServerTarget {
                host: "127.0.0.1".to_string(),
                port,
            },
        );

        let request =
            SubmissionRequest::new("alice", "secret", b"{}".to_vec(), PayloadEncoding::Plain);
        let err = relay.submit(request).await.unwrap_err();

        assert!(err.to_string().starts_with("job server call failed: "));

        // The reqwest cause stays reachable through the source chain
        let client_err = std::error::Error::source(&err).unwrap();
        assert!(std::error::Error::source(client_err).is_some());

        assert!(matches!(
            err,
            RelayError::Transport(ClientError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_shape_result_success_base64() {
        let outcome = SubmitOutcome {
            response: b"done".to_vec(),
            job_id: Some("5".to_string()),
            session: false,
            return_code: 0,
        };
        let result = shape_result(outcome, PayloadEncoding::Base64);
        assert_eq!(
            codec::decode(&result.payload, PayloadEncoding::Base64).unwrap(),
            b"done".to_vec()
        );
    }
}
