//! Persistence contract for session state.
//!
//! The two root aggregates are stored independently under fixed keys. Loads
//! never fail: a missing or undecodable record falls back to the caller's
//! default (a fresh session, an empty history) after a warn-level log. Saves
//! are best-effort; a failed save leaves the previously persisted state in
//! place and is reported to the caller.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::FishingSession;

/// Storage key for the open session.
pub const KEY_CURRENT_SESSION: &str = "currentSession";

/// Storage key for the list of closed sessions, most recently ended first.
pub const KEY_SESSION_HISTORY: &str = "sessionHistory";

/// Errors a store may report when writing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value could not be serialized.
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    /// The backing store rejected the write.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable key-value persistence for the session manager's aggregates.
pub trait SessionStore {
    /// Loads the current session, or a fresh empty one on any failure.
    fn load_current_session(&self) -> FishingSession;

    /// Loads the session history, or an empty history on any failure.
    fn load_history(&self) -> Vec<FishingSession>;

    /// Persists the current session.
    fn save_current_session(&mut self, session: &FishingSession) -> Result<(), StoreError>;

    /// Persists the session history in order, head first.
    fn save_history(&mut self, history: &[FishingSession]) -> Result<(), StoreError>;
}

/// In-memory store holding JSON blobs.
///
/// Used in tests and anywhere durability is not needed. The `fail_writes`
/// switch makes every save report a backend error, for exercising the
/// best-effort save policy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// The raw JSON stored under a key, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Inserts a raw value, bypassing serialization.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    fn load_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.entries.get(key) {
            None => default(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "discarding undecodable record");
                default()
            }),
        }
    }

    fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("writes disabled".to_string()));
        }
        let raw = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), raw);
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load_current_session(&self) -> FishingSession {
        self.load_or(KEY_CURRENT_SESSION, FishingSession::new)
    }

    fn load_history(&self) -> Vec<FishingSession> {
        self.load_or(KEY_SESSION_HISTORY, Vec::new)
    }

    fn save_current_session(&mut self, session: &FishingSession) -> Result<(), StoreError> {
        self.put(KEY_CURRENT_SESSION, session)
    }

    fn save_history(&mut self, history: &[FishingSession]) -> Result<(), StoreError> {
        self.put(KEY_SESSION_HISTORY, history)
    }
}
