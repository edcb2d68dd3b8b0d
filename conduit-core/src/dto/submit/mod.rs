//! Relay API DTOs

use serde::{Deserialize, Serialize};

use crate::domain::submission::{PayloadEncoding, SubmissionRequest, SubmissionResult};

/// Body of `POST /api/submit`
#[derive(Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub username: String,
    pub password: String,
    /// Workflow JSON, or its base64 form when `encoding` is `base64`
    pub payload: String,
    #[serde(default)]
    pub encoding: PayloadEncoding,
}

impl std::fmt::Debug for SubmitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("payload_len", &self.payload.len())
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl From<SubmitRequest> for SubmissionRequest {
    fn from(req: SubmitRequest) -> Self {
        SubmissionRequest::new(
            req.username,
            req.password,
            req.payload.into_bytes(),
            req.encoding,
        )
    }
}

/// Response of `POST /api/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub job_id: Option<String>,
    pub payload: String,
    pub return_code: i32,
}

impl TryFrom<SubmissionResult> for SubmitResponse {
    type Error = std::string::FromUtf8Error;

    /// Fails when the payload is not UTF-8 and so cannot be carried as a
    /// JSON string.
    fn try_from(result: SubmissionResult) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: result.job_id,
            payload: String::from_utf8(result.payload)?,
            return_code: result.return_code,
        })
    }
}
