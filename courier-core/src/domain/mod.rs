//! Core domain types
//!
//! A delivery is one run of the external delivery script. The server owns the
//! records; client and CLI only see them through the DTOs.

pub mod delivery;
