//! Domain model for the hotel booking demo.
//!
//! # Responsibility
//! - Define the room and booking records persisted by the store.
//! - Own the JSON wire shape of both collections.
//!
//! # Invariants
//! - Records are identified by stable integer ids.
//! - Neither rooms nor bookings are ever hard-deleted.

pub mod booking;
pub mod room;
pub mod stats;
