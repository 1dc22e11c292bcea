//! JSON collections stored under one storage key.
//!
//! # Responsibility
//! - Read and write whole record arrays through a `KeyValueStore`.
//! - Distinguish absent, malformed and unreadable collections.
//!
//! # Invariants
//! - A collection is always rewritten in full; there are no partial updates.
//! - Absent keys and empty values read as empty collections.
//! - The strict read path rejects malformed JSON; the lenient path masks it.

use crate::storage::{KeyValueStore, StorageError};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Collection read/write error.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// The stored value under `key` is not a valid record array.
    InvalidData {
        key: &'static str,
        message: String,
    },
    /// Records could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted data under `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode records: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Typed view over the JSON array stored at `key`.
pub struct Collection<'s, S: ?Sized, T> {
    storage: &'s S,
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<'s, S, T> Collection<'s, S, T>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: &'s S, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _record: PhantomData,
        }
    }

    /// Returns whether the key holds a value. An empty string counts as
    /// absent.
    pub fn exists(&self) -> RepoResult<bool> {
        Ok(self
            .storage
            .get(self.key)?
            .is_some_and(|raw| !raw.is_empty()))
    }

    /// Strict read.
    ///
    /// # Errors
    /// - `RepoError::InvalidData` when the stored value is not a record array.
    /// - `RepoError::Storage` when the medium cannot be read.
    pub fn load(&self) -> RepoResult<Vec<T>> {
        let raw = match self.storage.get(self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        // A stored `null` reads the same as a missing key.
        let records: Option<Vec<T>> =
            serde_json::from_str(&raw).map_err(|err| RepoError::InvalidData {
                key: self.key,
                message: err.to_string(),
            })?;
        Ok(records.unwrap_or_default())
    }

    /// Lenient read: malformed content is treated as an empty collection.
    ///
    /// Storage failures still propagate.
    pub fn load_or_empty(&self) -> RepoResult<Vec<T>> {
        match self.load() {
            Ok(records) => Ok(records),
            Err(RepoError::InvalidData { key, message }) => {
                warn!(
                    "event=collection_read module=repo status=skip key={} reason=malformed error={}",
                    key, message
                );
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Serializes `records` and overwrites the whole collection.
    pub fn save(&self, records: &[T]) -> RepoResult<()> {
        let raw = serde_json::to_string(records).map_err(RepoError::Encode)?;
        self.storage.set(self.key, &raw)?;
        Ok(())
    }
}
