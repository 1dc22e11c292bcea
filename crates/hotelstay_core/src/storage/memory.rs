//! In-memory key-value medium.
//!
//! Backs tests and throwaway sessions. Write failures can be injected to
//! exercise the storage-failure path without a real backend.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// `HashMap`-backed store guarded by a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    rejected_keys: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with raw values.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
            rejected_keys: Mutex::default(),
        }
    }

    /// Makes every later `set` on `key` fail with `StorageError::WriteRejected`.
    pub fn reject_writes_to(&self, key: &str) -> StorageResult<()> {
        lock(&self.rejected_keys)?.insert(key.to_string());
        Ok(())
    }

    /// Returns whether `key` currently holds a value.
    pub fn contains_key(&self, key: &str) -> StorageResult<bool> {
        Ok(lock(&self.entries)?.contains_key(key))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if lock(&self.rejected_keys)?.contains(key) {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> StorageResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| StorageError::Poisoned)
}
