//! Delivery Repository
//!
//! In-memory store of every delivery started since the server came up.
//! All reads and writes go through one mutex, which is also what the
//! single-flight gate holds while it checks for a running delivery and
//! creates the next one.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use courier_core::domain::delivery::{
    Delivery, DeliveryId, DeliveryParameters, DeliveryResult, DeliveryStatus,
};

/// Delivery records and the id counter, guarded by [`DeliveryStore`]
#[derive(Debug)]
pub struct DeliveryTable {
    next_id: DeliveryId,
    deliveries: BTreeMap<DeliveryId, Delivery>,
}

impl DeliveryTable {
    fn new() -> Self {
        Self {
            next_id: 1,
            deliveries: BTreeMap::new(),
        }
    }

    /// Allocates the next id and inserts a delivery already in progress
    pub fn create(&mut self, parameters: DeliveryParameters) -> Delivery {
        let id = self.next_id;
        self.next_id += 1;

        let delivery = Delivery {
            id,
            status: DeliveryStatus::InProgress,
            parameters,
            requested_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };

        self.deliveries.insert(id, delivery.clone());
        delivery
    }

    pub fn get(&self, id: DeliveryId) -> Option<&Delivery> {
        self.deliveries.get(&id)
    }

    /// Returns the delivery currently in progress, if any
    pub fn in_progress(&self) -> Option<&Delivery> {
        self.deliveries
            .values()
            .find(|d| d.status == DeliveryStatus::InProgress)
    }

    pub fn has_in_progress(&self) -> bool {
        self.in_progress().is_some()
    }

    /// Moves a delivery out of `InProgress`, storing its result
    ///
    /// Returns false when the id is unknown or the delivery is already
    /// terminal; the stored result is never replaced.
    pub fn set_result(&mut self, id: DeliveryId, result: DeliveryResult) -> bool {
        let Some(delivery) = self.deliveries.get_mut(&id) else {
            tracing::warn!("Result reported for unknown delivery {}", id);
            return false;
        };

        if delivery.is_terminal() {
            tracing::warn!(
                "Ignoring second result for delivery {} (already {})",
                id,
                delivery.status
            );
            return false;
        }

        delivery.status = result.status();
        delivery.completed_at = Some(chrono::Utc::now());
        delivery.result = Some(result);
        true
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }
}

/// Shared, lock-guarded delivery store
#[derive(Debug)]
pub struct DeliveryStore {
    table: Mutex<DeliveryTable>,
}

impl DeliveryStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(DeliveryTable::new()),
        }
    }

    /// Locks the table for a multi-step operation
    ///
    /// Every mutation leaves the table consistent, so a poisoned lock is
    /// recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, DeliveryTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new delivery, already in progress
    ///
    /// Admission goes through the gate; this bypasses the single-flight check.
    #[allow(dead_code)]
    pub fn create(&self, parameters: DeliveryParameters) -> Delivery {
        self.lock().create(parameters)
    }

    /// Find a delivery by ID
    pub fn get(&self, id: DeliveryId) -> Option<Delivery> {
        self.lock().get(id).cloned()
    }

    /// Record the outcome of a delivery
    pub fn set_result(&self, id: DeliveryId, result: DeliveryResult) -> bool {
        self.lock().set_result(id, result)
    }

    #[allow(dead_code)]
    pub fn has_in_progress(&self) -> bool {
        self.lock().has_in_progress()
    }

    /// All deliveries ordered by id
    pub fn list(&self) -> Vec<Delivery> {
        self.lock().deliveries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

impl Default for DeliveryStore {
    fn default() -> Self {
        Self::new()
    }
}
