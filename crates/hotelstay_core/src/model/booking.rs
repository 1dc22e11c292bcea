//! Booking domain model.
//!
//! # Responsibility
//! - Define the persisted booking record and the caller-facing draft shape.
//! - Keep caller-supplied guest fields verbatim next to the typed core fields.
//!
//! # Invariants
//! - `id` is assigned by the store, never by callers.
//! - `details` never contains the reserved keys `id`, `roomId` or `status`.
//! - Bookings are never deleted; cancelled/completed records stay as history.

use crate::id::{coerce_id_value, RecordId};
use crate::model::room::RoomId;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable integer identifier for a booking (epoch-millisecond derived).
pub type BookingId = RecordId;

const RESERVED_KEYS: [&str; 3] = ["id", "roomId", "status"];

/// Booking lifecycle state.
///
/// Transitions are caller-driven and intentionally unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Returns whether the booking still holds its room.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Returns whether moving into this status frees the booked room.
    pub fn releases_room(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Returns the wire value used in persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// Persisted booking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    /// Referenced room. Not checked against the rooms collection.
    ///
    /// Records written from raw form payloads may hold it as a numeric
    /// string; those are read back as integers.
    #[serde(deserialize_with = "deserialize_room_id")]
    pub room_id: RoomId,
    pub status: BookingStatus,
    /// Guest name, contact, dates and any other caller-supplied fields.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Booking {
    /// Builds a booking from a draft with store-assigned identity.
    ///
    /// Status always starts as `pending`. Reserved keys left in
    /// `draft.details` are dropped so they cannot shadow the typed fields.
    pub fn from_draft(id: BookingId, draft: BookingDraft) -> Self {
        let mut details = draft.details;
        strip_reserved_keys(&mut details);
        Self {
            id,
            room_id: draft.room_id,
            status: BookingStatus::Pending,
            details,
        }
    }

    /// Returns one caller-supplied field by its wire name.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

/// Caller input for `RecordStore::add_booking`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub room_id: RoomId,
    pub details: Map<String, Value>,
}

impl BookingDraft {
    /// Creates a draft for one room with no extra fields.
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            details: Map::new(),
        }
    }

    /// Adds one caller-supplied field. Reserved keys are ignored.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.details.insert(key, value.into());
        }
        self
    }

    /// Builds a draft from a raw JSON object as submitted by a booking form.
    ///
    /// `roomId` may be a number or a numeric string; it is coerced to an
    /// integer. Any `id` or `status` supplied by the caller is discarded.
    ///
    /// # Errors
    /// - `DraftError::NotAnObject` when `value` is not a JSON object.
    /// - `DraftError::MissingRoomId` when `roomId` is absent or not coercible.
    pub fn from_json(value: Value) -> Result<Self, DraftError> {
        let Value::Object(mut fields) = value else {
            return Err(DraftError::NotAnObject);
        };

        let room_id = fields
            .get("roomId")
            .and_then(coerce_id_value)
            .ok_or(DraftError::MissingRoomId)?;

        strip_reserved_keys(&mut fields);
        Ok(Self {
            room_id,
            details: fields,
        })
    }
}

fn strip_reserved_keys(fields: &mut Map<String, Value>) {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
}

fn deserialize_room_id<'de, D>(deserializer: D) -> Result<RoomId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_id_value(&value)
        .ok_or_else(|| D::Error::custom(format!("roomId `{value}` is not a numeric id")))
}

/// Rejection reasons for raw booking payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    NotAnObject,
    MissingRoomId,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "booking payload must be a JSON object"),
            Self::MissingRoomId => write!(f, "booking payload has no usable roomId"),
        }
    }
}

impl Error for DraftError {}
