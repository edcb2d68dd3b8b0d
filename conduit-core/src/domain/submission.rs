//! Submission domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::credentials::Credentials;

/// How a payload travels between the caller and the relay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    #[default]
    Plain,
    Base64,
}

impl PayloadEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadEncoding::Plain => "plain",
            PayloadEncoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PayloadEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(PayloadEncoding::Plain),
            "base64" => Ok(PayloadEncoding::Base64),
            other => Err(format!(
                "unknown encoding '{}' (expected 'plain' or 'base64')",
                other
            )),
        }
    }
}

/// A single workflow submission as received by the relay
///
/// Created per incoming call and dropped once the call returns.
#[derive(Clone)]
pub struct SubmissionRequest {
    pub username: String,
    pub password: String,
    pub payload: Vec<u8>,
    pub encoding: PayloadEncoding,
}

impl SubmissionRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        payload: impl Into<Vec<u8>>,
        encoding: PayloadEncoding,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            payload: payload.into(),
            encoding,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

impl fmt::Debug for SubmissionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("payload_len", &self.payload.len())
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Outcome of a relayed submission
///
/// `return_code == 0` means the job server accepted the workflow. On any
/// other code `job_id` is `None` and `payload` holds the server's
/// diagnostic text, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub job_id: Option<String>,
    pub payload: Vec<u8>,
    pub return_code: i32,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.return_code == 0
    }
}
