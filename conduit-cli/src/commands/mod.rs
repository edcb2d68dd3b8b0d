//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod health;
mod submit;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a workflow to the job server through the relay
    Submit(submit::SubmitArgs),
    /// Check that the relay is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit(args) => submit::handle_submit(args, config).await,
        Commands::Health => health::handle_health(config).await,
    }
}
