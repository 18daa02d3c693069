//! Single-flight gate
//!
//! Admits a new delivery only while no other delivery is in progress.

use std::sync::Arc;

use courier_core::domain::delivery::{Delivery, DeliveryId, DeliveryParameters};
use thiserror::Error;

use crate::repository::DeliveryStore;

/// Reason a delivery was not admitted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("A delivery is already in progress. Please try again later.")]
    AlreadyInProgress { delivery_id: DeliveryId },
}

#[derive(Debug, Clone)]
pub struct SingleFlightGate {
    store: Arc<DeliveryStore>,
}

impl SingleFlightGate {
    pub fn new(store: Arc<DeliveryStore>) -> Self {
        Self { store }
    }

    /// Creates a delivery if none is in progress
    ///
    /// The check and the insert happen under one store lock, so concurrent
    /// callers can never both be admitted.
    pub fn try_admit(&self, parameters: DeliveryParameters) -> Result<Delivery, AdmissionError> {
        let mut table = self.store.lock();

        if let Some(running) = table.in_progress() {
            return Err(AdmissionError::AlreadyInProgress {
                delivery_id: running.id,
            });
        }

        Ok(table.create(parameters))
    }
}
