//! Conduit Relay Server
//!
//! Accepts workflow submissions over HTTP and forwards them to a fixed
//! job-execution server, relaying back the job id, response payload and
//! return code.

use std::sync::Arc;

use anyhow::{Context, Result};
use conduit_client::JobServerClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::relay_service::{JobServerTarget, RelayService};

pub mod api;
pub mod config;
pub mod service;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conduit_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Conduit relay...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let submitter = build_submitter(&config)?;
    let relay = RelayService::new(
        Arc::new(submitter),
        JobServerTarget {
            host: config.job_server_host.clone(),
            port: config.job_server_port,
        },
    );

    tracing::info!(
        "Forwarding submissions to {}://{}:{}",
        config.job_server_scheme,
        relay.target().host,
        relay.target().port
    );

    // Build router with all API endpoints
    let app = api::create_router(Arc::new(relay));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

/// Build the job server client with the configured scheme and timeout
fn build_submitter(config: &Config) -> Result<JobServerClient> {
    let http_client = reqwest::Client::builder()
        .timeout(config.job_server_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(JobServerClient::with_client(
        config.job_server_scheme.clone(),
        http_client,
    ))
}
