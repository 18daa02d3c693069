//! Delivery command handlers
//!
//! Starting deliveries, checking on them and listing past ones.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use courier_client::CourierClient;
use courier_core::domain::delivery::{DEFAULT_INTERFACE, DeliveryStatus};
use courier_core::dto::delivery::{
    DeliveryResponse, DeliverySummary, ResponseStatus, StartDeliveryRequest,
};

use crate::config::Config;

/// Delivery subcommands
#[derive(Subcommand)]
pub enum DeliveryCommands {
    /// Start a delivery
    Start {
        /// Network interface the robot is reached through
        #[arg(short, long, default_value = DEFAULT_INTERFACE)]
        interface: String,

        /// Free-text description of the delivery
        #[arg(short, long)]
        description: Option<String>,

        /// Wait for the delivery to finish
        #[arg(short, long)]
        wait: bool,

        /// Seconds between status checks while waiting
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
    /// Show the status of a delivery
    Status {
        /// Delivery ID
        id: String,
    },
    /// Wait until a delivery completes or fails
    Wait {
        /// Delivery ID
        id: String,

        /// Seconds between status checks
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
    /// List all deliveries since the server started
    List,
}

/// Handle delivery commands
pub async fn handle_delivery_command(command: DeliveryCommands, config: &Config) -> Result<()> {
    let client = CourierClient::new(&config.server_url);

    match command {
        DeliveryCommands::Start {
            interface,
            description,
            wait,
            interval,
        } => start_delivery(&client, interface, description, wait, interval).await,
        DeliveryCommands::Status { id } => show_status(&client, &id).await,
        DeliveryCommands::Wait { id, interval } => wait_for(&client, &id, interval).await,
        DeliveryCommands::List => list_deliveries(&client).await,
    }
}

async fn start_delivery(
    client: &CourierClient,
    interface_name: String,
    description: Option<String>,
    wait: bool,
    interval: u64,
) -> Result<()> {
    let response = client
        .start_delivery(&StartDeliveryRequest {
            interface_name,
            description,
        })
        .await
        .context("Failed to start delivery")?;

    let id = response
        .delivery_id
        .clone()
        .context("Server accepted the delivery without an ID")?;

    println!(
        "{} {} (delivery {})",
        "✓".green(),
        response.message,
        id.cyan()
    );

    if wait {
        wait_for(client, &id, interval).await?;
    }

    Ok(())
}

async fn show_status(client: &CourierClient, id: &str) -> Result<()> {
    let response = client.get_delivery_status(id).await?;
    print_status(&response);
    Ok(())
}

async fn wait_for(client: &CourierClient, id: &str, interval: u64) -> Result<()> {
    println!("{}", format!("Waiting for delivery {}...", id).dimmed());

    let response = client
        .wait_for_delivery(id, Duration::from_secs(interval.max(1)))
        .await?;
    print_status(&response);

    if response.status == ResponseStatus::Failed {
        anyhow::bail!("Delivery {} failed", id);
    }

    Ok(())
}

async fn list_deliveries(client: &CourierClient) -> Result<()> {
    let deliveries = client.list_deliveries().await?;

    if deliveries.is_empty() {
        println!("{}", "No deliveries yet.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} delivery(ies):", deliveries.len()).bold()
    );
    println!();
    for delivery in &deliveries {
        print_summary(delivery);
    }

    Ok(())
}

fn print_status(response: &DeliveryResponse) {
    let status = match response.status {
        ResponseStatus::Completed => "completed".green(),
        ResponseStatus::Failed => "failed".red(),
        ResponseStatus::InProgress => "in progress".yellow(),
        ResponseStatus::Accepted => "accepted".cyan(),
        ResponseStatus::Error => "error".red(),
    };

    println!("{}", "Delivery Status:".bold());
    if let Some(id) = &response.delivery_id {
        println!("  ID:      {}", id.cyan());
    }
    println!("  Status:  {}", status);
    println!("  Message: {}", response.message);

    if let Some(output) = response.output.as_deref().filter(|o| !o.trim().is_empty()) {
        println!("  Output:");
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", output.trim_end());
        println!("{}", "─".repeat(80).dimmed());
    }
}

fn print_summary(delivery: &DeliverySummary) {
    let status = match delivery.status {
        DeliveryStatus::Completed => delivery.status.as_str().green(),
        DeliveryStatus::Failed => delivery.status.as_str().red(),
        DeliveryStatus::InProgress | DeliveryStatus::Pending => {
            delivery.status.as_str().yellow()
        }
    };

    println!("  {} Delivery {}", "▸".cyan(), delivery.delivery_id);
    println!("    Status:    {}", status);
    println!("    Interface: {}", delivery.interface_name.dimmed());
    if let Some(description) = &delivery.description {
        println!("    About:     {}", description);
    }
    println!(
        "    Requested: {}",
        delivery
            .requested_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(completed) = delivery.completed_at {
        println!(
            "    Finished:  {}",
            completed.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
}
