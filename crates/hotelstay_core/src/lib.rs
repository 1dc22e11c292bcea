//! Core data access for the hotel booking demo.
//! Rooms and bookings live as JSON collections in a key-value medium.

pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use id::{coerce_id, Clock, FixedClock, RecordId, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::booking::{Booking, BookingDraft, BookingId, BookingStatus, DraftError};
pub use model::room::{Room, RoomId, RoomStatus};
pub use model::stats::Stats;
pub use repo::collection::{Collection, RepoError, RepoResult};
pub use service::record_store::{RecordStore, SeedReport, UpdateOutcome};
pub use storage::{
    KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageResult, BOOKINGS_KEY,
    GUESTS_KEY, ROOMS_KEY, SCHEMA_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
