//! Service Module
//!
//! Business logic layer for the server.
//! Services sit between the HTTP handlers and the delivery store.

pub mod delivery;
pub mod execution;
pub mod gate;
pub mod runner;

// Re-export for convenience
pub use delivery as delivery_service;
pub use execution::{DeliveryExecutor, ScriptExecutor};
pub use gate::SingleFlightGate;
pub use runner::DeliveryRunner;
