//! Room domain model.
//!
//! # Responsibility
//! - Define the persisted room record and its availability state.
//!
//! # Invariants
//! - `id` is unique across the rooms collection and never reused.
//! - Rooms are never deleted; only `status` changes after seeding.

use serde::{Deserialize, Serialize};

/// Stable integer identifier for a room.
pub type RoomId = i64;

/// Availability state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Free to be booked.
    Available,
    /// Held by a booking (best-effort, see `RecordStore::add_booking`).
    Booked,
}

impl RoomStatus {
    /// Returns the wire value used in persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
        }
    }
}

/// Persisted room record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    /// Door number shown to guests, e.g. `101`.
    pub number: String,
    /// Serialized as `type` to match the stored catalog.
    #[serde(rename = "type")]
    pub kind: String,
    /// Localized label for `kind`. Older snapshots store it as `typeAr`.
    #[serde(alias = "typeAr")]
    pub type_localized: String,
    /// Nightly price.
    pub price: f64,
    /// Maximum number of guests.
    pub capacity: u32,
    pub status: RoomStatus,
    /// Cover image URL.
    pub image: String,
}

impl Room {
    /// Returns whether the room can currently be booked.
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}
