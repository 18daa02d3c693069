//! Courier Server
//!
//! HTTP control surface for the robot delivery script. Accepts one delivery
//! at a time, runs the script in the background and reports its status.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod repository;
mod service;
mod state;

use crate::config::Config;
use crate::service::{DeliveryExecutor, ScriptExecutor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Port may be given as the first argument, overriding COURIER_PORT
    let config = Config::from_env()?.with_port_arg(std::env::args().nth(1))?;
    config.validate()?;

    tracing::info!("Starting Courier delivery API on port {}", config.port);

    if !config.delivery_script.is_file() {
        tracing::warn!(
            "Delivery script {} not found in the current directory",
            config.delivery_script.display()
        );
        tracing::warn!(
            "Make sure the delivery script sits next to the server or set COURIER_DELIVERY_SCRIPT"
        );
    }

    match config.delivery_timeout {
        Some(limit) => tracing::info!("Deliveries time out after {:?}", limit),
        None => tracing::info!("Deliveries run without a timeout"),
    }

    let executor: Arc<dyn DeliveryExecutor> = Arc::new(ScriptExecutor::from_config(&config));
    let app = api::create_router(AppState::new(executor));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
