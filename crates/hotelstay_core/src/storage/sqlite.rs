//! SQLite-backed key-value medium.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the `kv_entries` table.
//! - Create the `kv_entries` table before returning a usable store.
//!
//! # Invariants
//! - The table layout version is mirrored to `PRAGMA user_version`.
//! - Files written by a newer layout are refused, never rewritten.
//! - Only the table layout is versioned; record JSON inside values is not.
//! - One connection per store, serialized through a mutex.

use super::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Layout version of the `kv_entries` table written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_KV_ENTRIES_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value store persisted in a single SQLite table.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite file and ensures the `kv_entries` table.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        open_with("file", || Connection::open(path))
    }

    /// Opens a private in-memory SQLite database.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open_in_memory() -> StorageResult<Self> {
        open_with("memory", Connection::open_in_memory)
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

fn open_with<F>(mode: &str, connect: F) -> StorageResult<SqliteStore>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=store_open module=storage status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=storage status=error mode={} duration_ms={} error_code=store_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=store_open module=storage status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(SqliteStore {
                conn: Mutex::new(conn),
            })
        }
        Err(err) => {
            error!(
                "event=store_open module=storage status=error mode={} duration_ms={} error_code=store_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let on_disk: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if on_disk > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: on_disk,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if on_disk == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_ENTRIES_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}
