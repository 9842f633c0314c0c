//! Core domain logic for the fishing bite counter.
//!
//! This crate contains the fundamental types and logic for:
//! - Entity model: sessions, holes, and bite events with derived statistics
//! - Session manager: lifecycle operations that persist after each mutation
//! - Analytics: bait performance aggregated over all sessions
//! - Store contract: key-value persistence with load-default / best-effort
//!   save semantics

pub mod analytics;
pub mod manager;
pub mod model;
pub mod store;

pub use analytics::{BaitPerformance, bait_performance};
pub use manager::{Change, SessionError, SessionManager, SubscriptionId};
pub use model::{Bite, FishingSession, Hole};
pub use store::{
    KEY_CURRENT_SESSION, KEY_SESSION_HISTORY, MemoryStore, SessionStore, StoreError,
};
