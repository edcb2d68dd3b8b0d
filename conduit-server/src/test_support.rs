//! Shared fakes for unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conduit_client::Submitter;
use conduit_core::domain::credentials::Credentials;
use conduit_core::dto::job_server::SubmitOutcome;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub credentials: Credentials,
    pub host: String,
    pub port: u16,
    pub body: Vec<u8>,
}

/// Records every call and answers with a canned outcome
pub struct FakeSubmitter {
    outcome: SubmitOutcome,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeSubmitter {
    pub fn replying(response: &[u8], job_id: Option<&str>, return_code: i32) -> Arc<Self> {
        Arc::new(Self {
            outcome: SubmitOutcome {
                response: response.to_vec(),
                job_id: job_id.map(str::to_string),
                session: true,
                return_code,
            },
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Submitter for FakeSubmitter {
    async fn submit(
        &self,
        credentials: &Credentials,
        host: &str,
        port: u16,
        body: Vec<u8>,
    ) -> conduit_client::Result<SubmitOutcome> {
        self.calls.lock().unwrap().push(RecordedCall {
            credentials: credentials.clone(),
            host: host.to_string(),
            port,
            body,
        });
        Ok(self.outcome.clone())
    }
}

/// A local port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
