//! Courier Core
//!
//! Core types shared by the Courier delivery server, client and CLI.
//!
//! This crate contains:
//! - Domain types: the tracked delivery and its lifecycle
//! - DTOs: request/response bodies of the HTTP surface

pub mod domain;
pub mod dto;
