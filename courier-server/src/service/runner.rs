//! Delivery runner
//!
//! Runs admitted deliveries in the background and records their outcome.

use std::sync::Arc;

use courier_core::domain::delivery::{Delivery, DeliveryResult};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::repository::DeliveryStore;
use crate::service::execution::DeliveryExecutor;

#[derive(Clone)]
pub struct DeliveryRunner {
    store: Arc<DeliveryStore>,
    executor: Arc<dyn DeliveryExecutor>,
}

impl DeliveryRunner {
    pub fn new(store: Arc<DeliveryStore>, executor: Arc<dyn DeliveryExecutor>) -> Self {
        Self { store, executor }
    }

    /// Spawns a task that executes the delivery and stores its result
    ///
    /// The caller does not need to await the handle; the result is written
    /// to the store exactly once either way.
    pub fn spawn(&self, delivery: Delivery) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let executor = Arc::clone(&self.executor);

        tokio::spawn(async move { Self::run(store, executor, delivery).await })
    }

    async fn run(
        store: Arc<DeliveryStore>,
        executor: Arc<dyn DeliveryExecutor>,
        delivery: Delivery,
    ) {
        let id = delivery.id;
        info!(
            "Running delivery {} on interface {}",
            id, delivery.parameters.interface_name
        );

        // Run on a nested task so a panicking executor still fails the delivery
        let parameters = delivery.parameters;
        let attempt = tokio::spawn(async move { executor.execute(&parameters).await });

        let result = match attempt.await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => DeliveryResult::failed(None, format!("{:#}", e)),
            Err(e) => DeliveryResult::failed(None, format!("Delivery task aborted: {}", e)),
        };

        if result.success {
            info!("Delivery {} completed successfully", id);
            debug!("Delivery {} output: {}", id, result.output);
        } else {
            error!("Delivery {} failed: {}", id, result.output.trim_end());
        }

        store.set_result(id, result);
    }
}
