//! Relay configuration
//!
//! Defines where the relay listens and which job server it forwards to.
//! The job server target is fixed for the lifetime of the process.

use anyhow::Context;
use std::time::Duration;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// Job server host name or address
    pub job_server_host: String,

    /// Job server port
    pub job_server_port: u16,

    /// URL scheme used to reach the job server ("http" or "https")
    pub job_server_scheme: String,

    /// Request timeout applied by the submission client
    pub job_server_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults for everything but the target
    pub fn new(job_server_host: String, job_server_port: u16) -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            job_server_host,
            job_server_port,
            job_server_scheme: "http".to_string(),
            job_server_timeout: Duration::from_secs(300), // 5 minutes
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - CONDUIT_BIND_ADDR (default: 0.0.0.0:8080)
    /// - JOB_SERVER_HOST (default: localhost)
    /// - JOB_SERVER_PORT (default: 8443)
    /// - JOB_SERVER_SCHEME (default: http)
    /// - JOB_SERVER_TIMEOUT (seconds, default: 300)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let job_server_port = match lookup("JOB_SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("JOB_SERVER_PORT is not a valid port: {}", raw))?,
            None => defaults.job_server_port,
        };

        let job_server_timeout = lookup("JOB_SERVER_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.job_server_timeout);

        Ok(Self {
            bind_addr: lookup("CONDUIT_BIND_ADDR").unwrap_or(defaults.bind_addr),
            job_server_host: lookup("JOB_SERVER_HOST").unwrap_or(defaults.job_server_host),
            job_server_port,
            job_server_scheme: lookup("JOB_SERVER_SCHEME")
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or(defaults.job_server_scheme),
            job_server_timeout,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.job_server_host.is_empty() {
            anyhow::bail!("job_server_host cannot be empty");
        }

        if self.job_server_port == 0 {
            anyhow::bail!("job_server_port must be greater than 0");
        }

        if self.job_server_scheme != "http" && self.job_server_scheme != "https" {
            anyhow::bail!("job_server_scheme must be http or https");
        }

        if self.job_server_timeout.as_secs() == 0 {
            anyhow::bail!("job_server_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("localhost".to_string(), 8443)
    }
}
