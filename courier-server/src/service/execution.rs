//! Execution service
//!
//! Runs the external delivery script for one delivery and turns its exit
//! status and captured output into a [`DeliveryResult`].

use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use courier_core::domain::delivery::{DeliveryParameters, DeliveryResult};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;

/// Service trait for running a delivery
#[async_trait]
pub trait DeliveryExecutor: Send + Sync {
    /// Executes one delivery attempt
    ///
    /// A script that runs and fails is an `Ok` failed result. `Err` is
    /// reserved for deliveries that could not be launched at all.
    async fn execute(&self, parameters: &DeliveryParameters) -> Result<DeliveryResult>;
}

/// Runs `<program> <args...> <interface_name>` as a child process
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    program: OsString,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl ScriptExecutor {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Builds the executor described by the server configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.delivery_program)
            .arg(&config.delivery_script)
            .with_timeout(config.delivery_timeout)
    }

    /// Appends a fixed argument placed before the interface name
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DeliveryExecutor for ScriptExecutor {
    async fn execute(&self, parameters: &DeliveryParameters) -> Result<DeliveryResult> {
        let program = self.program.to_string_lossy();
        debug!(
            "Launching {} {:?} {}",
            program, self.args, parameters.interface_name
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(&parameters.interface_name)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(output) => output,
                Err(_) => {
                    // Dropping the output future kills the child
                    warn!("Delivery script exceeded its {:?} timeout", limit);
                    return Ok(DeliveryResult::failed(
                        None,
                        format!("Delivery timed out after {:?}", limit),
                    ));
                }
            },
            None => command.output().await,
        }
        .with_context(|| format!("Failed to launch '{}'", program))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            return Ok(DeliveryResult::succeeded(output.status.code(), stdout));
        }

        let error_text = if stderr.trim().is_empty() {
            format!("Delivery script exited with {}", output.status)
        } else {
            stderr
        };

        Ok(DeliveryResult::failed(output.status.code(), error_text))
    }
}
