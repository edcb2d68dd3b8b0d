//! Conduit CLI
//!
//! Command-line interface for submitting workflows through the Conduit relay.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "conduit")]
#[command(about = "Conduit workflow submission CLI", long_about = None)]
struct Cli {
    /// Relay URL
    #[arg(long, env = "RELAY_URL", default_value = "http://localhost:8080")]
    relay_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        relay_url: cli.relay_url,
    };

    handle_command(cli.command, &config).await
}
