//! Health command handler

use anyhow::{Context, Result};
use colored::*;
use conduit_client::RelayClient;

use crate::config::Config;

/// Report whether the relay answers its health check
pub async fn handle_health(config: &Config) -> Result<()> {
    let client = RelayClient::new(&config.relay_url);

    client
        .health()
        .await
        .with_context(|| format!("Relay at {} is not reachable", client.base_url()))?;

    println!(
        "{} Relay at {} is healthy",
        "✓".green(),
        client.base_url().bold()
    );

    Ok(())
}
