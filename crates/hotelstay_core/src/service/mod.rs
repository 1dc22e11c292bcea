//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection reads/writes into booking-level operations.
//! - Keep UI callers decoupled from storage keys and JSON encoding.

pub mod record_store;
pub mod seed;
