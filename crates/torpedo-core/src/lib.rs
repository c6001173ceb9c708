//! Core types and definitions for torpedo guidance.
//!
//! This crate defines the vocabulary shared across the other crates:
//! value types, tuning constants, guidance states, events, designer
//! configuration and snapshots. It has no dependency on any host engine.

pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
