//! SQLite-backed key-value storage for the fishing bite counter.
//!
//! The two root aggregates (current session, session history) are stored as
//! JSON documents in a single `kv` table, keyed by the fixed store keys from
//! `fbc-core`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. A `Database` instance can be moved between threads but cannot
//! be shared across threads without external synchronization. The session
//! manager is single-writer by design, so this is not a constraint in
//! practice; wrap in a `Mutex` if that ever changes.
//!
//! # Schema
//!
//! ```sql
//! kv (key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at TEXT NOT NULL)
//! ```
//!
//! Values are `serde_json` documents with camelCase field names; `updated_at`
//! is ISO 8601 UTC, so lexicographic ordering matches chronological ordering.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use fbc_core::{
    FishingSession, KEY_CURRENT_SESSION, KEY_SESSION_HISTORY, SessionStore, StoreError,
};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Both a missing row and an undecodable document yield `None`; decode
    /// failures are logged and otherwise swallowed, per the load contract.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw: String = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "failed to read record");
                None
            })?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable record");
                None
            }
        }
    }

    /// Encodes and upserts `value` under `key`.
    fn put_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn
            .execute(
                "
                INSERT INTO kv (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                ",
                params![key, raw, updated_at],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl SessionStore for Database {
    fn load_current_session(&self) -> FishingSession {
        self.get_json(KEY_CURRENT_SESSION)
            .unwrap_or_else(FishingSession::new)
    }

    fn load_history(&self) -> Vec<FishingSession> {
        self.get_json(KEY_SESSION_HISTORY).unwrap_or_default()
    }

    fn save_current_session(&mut self, session: &FishingSession) -> Result<(), StoreError> {
        self.put_json(KEY_CURRENT_SESSION, session)
    }

    fn save_history(&mut self, history: &[FishingSession]) -> Result<(), StoreError> {
        self.put_json(KEY_SESSION_HISTORY, history)
    }
}
