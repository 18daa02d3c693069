//! Server configuration
//!
//! Defines the listen address and how the external delivery script is
//! launched.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the HTTP server binds to
    pub bind_host: String,

    /// HTTP port
    pub port: u16,

    /// Program used to run the delivery script (e.g. "python")
    pub delivery_program: String,

    /// Path of the delivery script, passed as the program's first argument
    pub delivery_script: PathBuf,

    /// Maximum time a delivery may run; `None` lets it run indefinitely
    pub delivery_timeout: Option<Duration>,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Environment variables (all optional):
    /// - COURIER_BIND_HOST (default: 0.0.0.0)
    /// - COURIER_PORT (default: 8001)
    /// - COURIER_DELIVERY_PROGRAM (default: python)
    /// - COURIER_DELIVERY_SCRIPT (default: deliver_return.py)
    /// - COURIER_DELIVERY_TIMEOUT (seconds, default: unset)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_host = std::env::var("COURIER_BIND_HOST").unwrap_or(defaults.bind_host);

        let port = match std::env::var("COURIER_PORT") {
            Ok(value) => parse_port(&value)?,
            Err(_) => defaults.port,
        };

        let delivery_program =
            std::env::var("COURIER_DELIVERY_PROGRAM").unwrap_or(defaults.delivery_program);

        let delivery_script = std::env::var("COURIER_DELIVERY_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or(defaults.delivery_script);

        let delivery_timeout = match std::env::var("COURIER_DELIVERY_TIMEOUT") {
            Ok(value) => Some(
                value
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("Invalid COURIER_DELIVERY_TIMEOUT '{}'", value))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            bind_host,
            port,
            delivery_program,
            delivery_script,
            delivery_timeout,
        })
    }

    /// Overrides the port with a positional command-line argument, if given
    pub fn with_port_arg(mut self, arg: Option<String>) -> anyhow::Result<Self> {
        if let Some(arg) = arg {
            self.port = parse_port(&arg)?;
        }
        Ok(self)
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.bind_host, self.port))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.delivery_program.trim().is_empty() {
            anyhow::bail!("delivery_program cannot be empty");
        }

        if self.delivery_script.as_os_str().is_empty() {
            anyhow::bail!("delivery_script cannot be empty");
        }

        if self.delivery_timeout == Some(Duration::ZERO) {
            anyhow::bail!("delivery_timeout must be greater than 0");
        }

        self.bind_addr()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8001,
            delivery_program: "python".to_string(),
            delivery_script: PathBuf::from("deliver_return.py"),
            delivery_timeout: None,
        }
    }
}

fn parse_port(value: &str) -> anyhow::Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .with_context(|| format!("Invalid port '{}'", value))
}
