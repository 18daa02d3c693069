//! Delivery DTOs for the HTTP API

use serde::{Deserialize, Serialize};

use crate::domain::delivery::{DEFAULT_INTERFACE, Delivery, DeliveryParameters, DeliveryStatus};

/// Body of `POST /api/delivery/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDeliveryRequest {
    #[serde(default = "default_interface")]
    pub interface_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_interface() -> String {
    DEFAULT_INTERFACE.to_string()
}

impl Default for StartDeliveryRequest {
    fn default() -> Self {
        Self {
            interface_name: default_interface(),
            description: None,
        }
    }
}

impl From<StartDeliveryRequest> for DeliveryParameters {
    fn from(req: StartDeliveryRequest) -> Self {
        Self {
            interface_name: req.interface_name,
            description: req.description,
        }
    }
}

/// `status` field of a [`DeliveryResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Accepted,
    Error,
    InProgress,
    Completed,
    Failed,
}

impl ResponseStatus {
    /// Returns true for the statuses a delivery settles in
    pub fn is_terminal(self) -> bool {
        matches!(self, ResponseStatus::Completed | ResponseStatus::Failed)
    }
}

impl From<DeliveryStatus> for ResponseStatus {
    fn from(status: DeliveryStatus) -> Self {
        match status {
            // Pending is never stored; report it as running rather than invent a wire value
            DeliveryStatus::Pending | DeliveryStatus::InProgress => ResponseStatus::InProgress,
            DeliveryStatus::Completed => ResponseStatus::Completed,
            DeliveryStatus::Failed => ResponseStatus::Failed,
        }
    }
}

/// Response of the start and status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub delivery_id: Option<String>,
    /// Captured script output, present once the delivery finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl DeliveryResponse {
    pub fn accepted(delivery: &Delivery) -> Self {
        Self {
            status: ResponseStatus::Accepted,
            message: "Delivery process started".to_string(),
            delivery_id: Some(delivery.id.to_string()),
            output: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            delivery_id: None,
            output: None,
        }
    }

    /// Status response for a delivery looked up by `requested_id`
    ///
    /// The ID text is echoed as the caller sent it rather than re-rendered
    /// from the numeric id.
    pub fn from_delivery(delivery: &Delivery, requested_id: &str) -> Self {
        Self {
            status: delivery.status.into(),
            message: format!("Delivery {} is {}", requested_id, delivery.status),
            delivery_id: Some(requested_id.to_string()),
            output: delivery.result.as_ref().map(|r| r.output.clone()),
        }
    }
}

/// Entry of the delivery history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySummary {
    pub delivery_id: String,
    pub status: DeliveryStatus,
    pub interface_name: String,
    pub description: Option<String>,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&Delivery> for DeliverySummary {
    fn from(delivery: &Delivery) -> Self {
        Self {
            delivery_id: delivery.id.to_string(),
            status: delivery.status,
            interface_name: delivery.parameters.interface_name.clone(),
            description: delivery.parameters.description.clone(),
            requested_at: delivery.requested_at,
            completed_at: delivery.completed_at,
        }
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "API is running".to_string(),
        }
    }
}
