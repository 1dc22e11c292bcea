//! Aggregate counters for the admin dashboard.

use crate::model::booking::Booking;
use crate::model::room::Room;
use serde::{Deserialize, Serialize};

/// Derived counts over the rooms and bookings collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub total_bookings: usize,
    /// Bookings in `pending` or `confirmed` state.
    pub active_bookings: usize,
}

impl Stats {
    /// Counts over already-loaded collections.
    pub fn from_records(rooms: &[Room], bookings: &[Booking]) -> Self {
        Self {
            total_rooms: rooms.len(),
            available_rooms: rooms.iter().filter(|room| room.is_available()).count(),
            total_bookings: bookings.len(),
            active_bookings: bookings
                .iter()
                .filter(|booking| booking.status.is_active())
                .count(),
        }
    }
}
