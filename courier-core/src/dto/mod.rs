//! Data Transfer Objects
//!
//! Request and response bodies exchanged over the HTTP API.

pub mod delivery;
