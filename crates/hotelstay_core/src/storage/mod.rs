//! Persistent key-value storage medium.
//!
//! # Responsibility
//! - Define the get/set contract the record store is written against.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Values are opaque strings; callers own their serialization.
//! - `set` overwrites the whole value for a key (last writer wins).
//! - Implementations use interior mutability so a store can be shared by `&`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, SCHEMA_VERSION};

/// Key holding the JSON array of rooms.
pub const ROOMS_KEY: &str = "hotel_rooms";
/// Key holding the JSON array of bookings.
pub const BOOKINGS_KEY: &str = "hotel_bookings";
/// Reserved for guest profiles managed outside this crate. Never read or
/// written here.
pub const GUESTS_KEY: &str = "hotel_guests";

pub type StorageResult<T> = Result<T, StorageError>;

/// Generic I/O failure of the storage medium.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The medium refused a write (quota exceeded, access denied, ...).
    WriteRejected {
        key: String,
        reason: String,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A mutex guarding the medium was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::WriteRejected { key, reason } => {
                write!(f, "storage rejected write to `{key}`: {reason}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::WriteRejected { .. } | Self::UnsupportedSchemaVersion { .. } | Self::Poisoned => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value medium backing the record collections.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
