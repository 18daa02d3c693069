//! Delivery domain types

use serde::{Deserialize, Serialize};

/// Identifier of a delivery, allocated sequentially starting at 1
pub type DeliveryId = u64;

/// Network interface used when a request does not name one
pub const DEFAULT_INTERFACE: &str = "en7";

/// Delivery record
///
/// Created already `InProgress` and mutated exactly once when the external
/// script finishes. Records live for the lifetime of the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub status: DeliveryStatus,
    pub parameters: DeliveryParameters,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub result: Option<DeliveryResult>,
}

impl Delivery {
    /// Returns true once the delivery has left `InProgress`
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Delivery lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Never produced: deliveries are created in progress
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Completed | DeliveryStatus::Failed)
    }

    /// Wire name, as used in status messages
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed => "completed",
            DeliveryStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters a delivery was started with, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryParameters {
    pub interface_name: String,
    pub description: Option<String>,
}

impl Default for DeliveryParameters {
    fn default() -> Self {
        Self {
            interface_name: DEFAULT_INTERFACE.to_string(),
            description: None,
        }
    }
}

/// Outcome of running the delivery script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub success: bool,
    /// Process exit code, absent when the process never exited normally
    pub exit_code: Option<i32>,
    /// Captured stdout on success, error text on failure
    pub output: String,
}

impl DeliveryResult {
    pub fn succeeded(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code,
            output: output.into(),
        }
    }

    pub fn failed(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            output: output.into(),
        }
    }

    /// Terminal status this result moves a delivery to
    pub fn status(&self) -> DeliveryStatus {
        if self.success {
            DeliveryStatus::Completed
        } else {
            DeliveryStatus::Failed
        }
    }
}
