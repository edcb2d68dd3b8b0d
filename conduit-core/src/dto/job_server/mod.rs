//! Job server DTOs
//!
//! Wire format of the job server's submission endpoint and the named record
//! the submission client hands back to the relay.

use serde::{Deserialize, Serialize};

/// JSON body returned by `POST /api/jobs/submit` on the job server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobServerReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub job_id: Option<String>,
    /// Whether the server opened a session for this user
    #[serde(default)]
    pub session: bool,
    pub return_code: i32,
}

/// Result of one submission call against the job server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub response: Vec<u8>,
    pub job_id: Option<String>,
    pub session: bool,
    pub return_code: i32,
}

impl From<JobServerReply> for SubmitOutcome {
    fn from(reply: JobServerReply) -> Self {
        Self {
            response: reply.response.into_bytes(),
            job_id: reply.job_id,
            session: reply.session,
            return_code: reply.return_code,
        }
    }
}
