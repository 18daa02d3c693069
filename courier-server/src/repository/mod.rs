//! Repository Module
//!
//! Data access layer for the server. Deliveries are held in memory for the
//! lifetime of the process.

pub mod delivery;

// Re-export for convenience
pub use delivery::DeliveryStore;
