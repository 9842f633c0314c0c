//! Shared helpers for resolving user-entered references and formatting.

use anyhow::{Result, bail};
use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use fbc_core::FishingSession;

/// Resolves a hole reference to its id.
///
/// Accepts a full UUID, a UUID prefix, or an exact hole name. Name matches
/// take priority so a name that happens to look like a hex prefix still
/// resolves to the hole the user sees in listings.
pub fn resolve_hole(session: &FishingSession, query: &str) -> Result<Uuid> {
    if let Some(hole) = session.holes.iter().find(|h| h.name == query) {
        return Ok(hole.id);
    }

    let needle = query.to_lowercase();
    let matches: Vec<Uuid> = session
        .holes
        .iter()
        .filter(|h| h.id.to_string().starts_with(&needle))
        .map(|h| h.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no hole matches '{query}' in the current session"),
        _ => bail!("'{query}' is ambiguous; use more of the id"),
    }
}

/// Resolves a history session reference (UUID or UUID prefix) to its id.
pub fn resolve_history_session(history: &[FishingSession], query: &str) -> Result<Uuid> {
    let needle = query.to_lowercase();
    let matches: Vec<Uuid> = history
        .iter()
        .filter(|s| s.id.to_string().starts_with(&needle))
        .map(|s| s.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no past session matches '{query}'"),
        _ => bail!("'{query}' is ambiguous; use more of the id"),
    }
}

/// First eight hex digits of an id, as shown in listings.
pub fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Renders an instant in the user's local time.
pub fn format_local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
