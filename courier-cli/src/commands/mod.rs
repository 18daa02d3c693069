//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod delivery;

pub use delivery::DeliveryCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use courier_client::CourierClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the server is running
    Health,
    /// Delivery control
    Delivery {
        #[command(subcommand)]
        command: DeliveryCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Health => health(config).await,
        Commands::Delivery { command } => delivery::handle_delivery_command(command, config).await,
    }
}

async fn health(config: &Config) -> Result<()> {
    let client = CourierClient::new(&config.server_url);
    let health = client.health().await?;

    println!(
        "{} {} ({})",
        "✓".green(),
        health.status.bold(),
        health.message.dimmed()
    );

    Ok(())
}
