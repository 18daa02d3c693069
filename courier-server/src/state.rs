//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::repository::DeliveryStore;
use crate::service::{DeliveryExecutor, DeliveryRunner, SingleFlightGate};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DeliveryStore>,
    pub gate: SingleFlightGate,
    pub runner: DeliveryRunner,
}

impl AppState {
    /// Builds a fresh store with the gate and runner wired to it
    pub fn new(executor: Arc<dyn DeliveryExecutor>) -> Self {
        let store = Arc::new(DeliveryStore::new());
        Self {
            gate: SingleFlightGate::new(Arc::clone(&store)),
            runner: DeliveryRunner::new(Arc::clone(&store), executor),
            store,
        }
    }
}
