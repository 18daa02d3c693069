//! Delivery Service
//!
//! Business logic behind the delivery endpoints.

use courier_core::domain::delivery::{Delivery, DeliveryId};
use courier_core::dto::delivery::StartDeliveryRequest;
use thiserror::Error;

use crate::service::gate::AdmissionError;
use crate::state::AppState;

/// Service error type for delivery lookups
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid delivery ID format")]
    InvalidId(String),
    #[error("Delivery {0} not found")]
    NotFound(String),
}

/// Admit a new delivery and start it in the background
///
/// Returns as soon as the delivery is recorded; the script keeps running on
/// its own task.
pub fn start_delivery(
    state: &AppState,
    req: StartDeliveryRequest,
) -> Result<Delivery, AdmissionError> {
    let delivery = state.gate.try_admit(req.into())?;

    tracing::info!(
        "Delivery {} accepted on interface {} ({} total)",
        delivery.id,
        delivery.parameters.interface_name,
        state.store.len()
    );
    if let Some(description) = &delivery.parameters.description {
        tracing::debug!("Delivery {} description: {}", delivery.id, description);
    }

    state.runner.spawn(delivery.clone());

    Ok(delivery)
}

/// Get a delivery by its textual ID
pub fn get_delivery(state: &AppState, raw_id: &str) -> Result<Delivery, DeliveryError> {
    let id = parse_delivery_id(raw_id)?
        .ok_or_else(|| DeliveryError::NotFound(raw_id.to_string()))?;

    state
        .store
        .get(id)
        .ok_or_else(|| DeliveryError::NotFound(raw_id.to_string()))
}

/// List all deliveries since startup
pub fn list_deliveries(state: &AppState) -> Vec<Delivery> {
    state.store.list()
}

// =============================================================================
// Validation
// =============================================================================

/// Parses a path ID
///
/// Any integer of any size is well-formed. Integers that cannot be a
/// `DeliveryId` (negative, or too large) can never exist and yield `None`.
fn parse_delivery_id(raw: &str) -> Result<Option<DeliveryId>, DeliveryError> {
    let text = raw.trim();

    if let Ok(id) = text.parse::<DeliveryId>() {
        return Ok(Some(id));
    }

    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    Err(DeliveryError::InvalidId(raw.to_string()))
}
