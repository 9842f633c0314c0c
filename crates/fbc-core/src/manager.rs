//! Session lifecycle operations over a persistence store.
//!
//! [`SessionManager`] is the single writer for the current session and the
//! session history. Every mutation runs to completion in memory, is persisted
//! through the [`SessionStore`], and then published to subscribers. Lookups
//! resolve by id; an unknown id is a silent no-op, never an error.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{FishingSession, Hole};
use crate::store::{SessionStore, StoreError};

/// Errors from operations that validate their input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The hole name was empty after trimming.
    #[error("hole name cannot be empty")]
    EmptyHoleName,
}

/// Which aggregate a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    CurrentSession,
    History,
}

/// Handle returned by [`SessionManager::subscribe`].
pub type SubscriptionId = u64;

type Subscriber = Box<dyn Fn(Change)>;

/// Owns the current session and history, persisting after each mutation.
///
/// Construct one explicitly and pass it to whoever needs it; there is no
/// global instance. Saves are best-effort: a failed save keeps the in-memory
/// mutation, logs a warning, and is retained for inspection via
/// [`last_save_error`](Self::last_save_error).
pub struct SessionManager<S: SessionStore> {
    store: S,
    current: FishingSession,
    history: Vec<FishingSession>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
    last_save_error: Option<StoreError>,
}

impl<S: SessionStore> SessionManager<S> {
    /// Loads state from the store, substituting defaults where needed.
    pub fn new(store: S) -> Self {
        let current = store.load_current_session();
        let history = store.load_history();
        Self {
            store,
            current,
            history,
            subscribers: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        }
    }

    /// The open session.
    pub fn current_session(&self) -> &FishingSession {
        &self.current
    }

    /// Closed sessions, most recently ended first.
    pub fn history(&self) -> &[FishingSession] {
        &self.history
    }

    /// The most recently skipped save, if any.
    pub fn last_save_error(&self) -> Option<&StoreError> {
        self.last_save_error.as_ref()
    }

    /// Clears and returns the most recently skipped save.
    pub fn take_save_error(&mut self) -> Option<StoreError> {
        self.last_save_error.take()
    }

    /// Consumes the manager, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a callback invoked after every applied mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(Change) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Adds a hole to the current session.
    ///
    /// Returns the new hole's id. Rejects names that are empty after
    /// trimming; the name is otherwise stored as given.
    pub fn add_hole(&mut self, name: &str, bait: Option<&str>) -> Result<Uuid, SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::EmptyHoleName);
        }
        let mut hole = Hole::new(name);
        hole.bait = bait.map(str::to_string);
        let id = hole.id;
        self.current.holes.push(hole);
        self.persist_current();
        Ok(id)
    }

    /// Replaces the current-session hole with a matching id, wholesale.
    ///
    /// Position among the holes is preserved. No-op if no hole matches.
    pub fn update_hole(&mut self, hole: Hole) {
        if let Some(slot) = self.current.holes.iter_mut().find(|h| h.id == hole.id) {
            *slot = hole;
            self.persist_current();
        }
    }

    /// Removes the current-session hole with a matching id.
    pub fn delete_hole(&mut self, hole_id: Uuid) {
        let before = self.current.holes.len();
        self.current.holes.retain(|h| h.id != hole_id);
        if self.current.holes.len() != before {
            self.persist_current();
        }
    }

    /// Records a bite, stamped now, at the matching hole.
    pub fn add_bite(&mut self, hole_id: Uuid, was_caught: bool) {
        if let Some(hole) = self.current.holes.iter_mut().find(|h| h.id == hole_id) {
            hole.add_bite(was_caught);
            self.persist_current();
        }
    }

    /// Clears all bites at the matching hole, keeping its identity fields.
    pub fn reset_hole(&mut self, hole_id: Uuid) {
        if let Some(hole) = self.current.holes.iter_mut().find(|h| h.id == hole_id) {
            hole.reset();
            self.persist_current();
        }
    }

    /// Closes the current session and starts a fresh one.
    ///
    /// The closed session is stamped `ended_at = now` and inserted at the
    /// head of history. A session with no holes is not worth keeping, so
    /// ending it is a no-op.
    pub fn end_current_session(&mut self) {
        if self.current.holes.is_empty() {
            return;
        }
        let mut ended = std::mem::replace(&mut self.current, FishingSession::new());
        ended.ended_at = Some(Utc::now());
        self.history.insert(0, ended);
        self.persist_history();
        self.persist_current();
    }

    /// Removes the history session with a matching id.
    pub fn delete_history_session(&mut self, session_id: Uuid) {
        let before = self.history.len();
        self.history.retain(|s| s.id != session_id);
        if self.history.len() != before {
            self.persist_history();
        }
    }

    /// Empties the session history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    /// Bait performance across the history and the current session.
    ///
    /// The current session is included unconditionally; history sessions are
    /// processed first, so their baits fix the display names.
    pub fn bait_performance(&self) -> Vec<crate::analytics::BaitPerformance> {
        crate::analytics::bait_performance(
            self.history.iter().chain(std::iter::once(&self.current)),
        )
    }

    fn persist_current(&mut self) {
        if let Err(e) = self.store.save_current_session(&self.current) {
            tracing::warn!(error = %e, "current session not persisted; keeping in-memory state");
            self.last_save_error = Some(e);
        }
        self.notify(Change::CurrentSession);
    }

    fn persist_history(&mut self) {
        if let Err(e) = self.store.save_history(&self.history) {
            tracing::warn!(error = %e, "history not persisted; keeping in-memory state");
            self.last_save_error = Some(e);
        }
        self.notify(Change::History);
    }

    fn notify(&self, change: Change) {
        for (_, subscriber) in &self.subscribers {
            subscriber(change);
        }
    }
}
