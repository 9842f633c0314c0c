//! Bait performance aggregation.
//!
//! Pure functions over session data; no mutation, no persistence. Hourly
//! bite distribution lives on [`FishingSession`](crate::model::FishingSession)
//! since it is charted per session, not globally.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::FishingSession;

/// Aggregated bite and catch totals for one bait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaitPerformance {
    /// Trimmed bait name as first encountered (original casing).
    pub name: String,
    pub bites: u32,
    pub catches: u32,
}

impl BaitPerformance {
    /// Percentage of bites converted to catches; 0 when no bites recorded.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        if self.bites == 0 {
            0.0
        } else {
            f64::from(self.catches) / f64::from(self.bites) * 100.0
        }
    }
}

/// Aggregates bait performance across the given sessions.
///
/// Holes with no bait, or whose bait trims to empty, are skipped. Holes are
/// grouped by trimmed, lowercased bait name; the record's display name is
/// fixed the first time a key is seen, so later casings do not overwrite it.
/// Results are sorted by catches descending; ties keep first-encounter order
/// (the sort is stable and compares catches only).
pub fn bait_performance<'a, I>(sessions: I) -> Vec<BaitPerformance>
where
    I: IntoIterator<Item = &'a FishingSession>,
{
    let mut records: Vec<BaitPerformance> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        for hole in &session.holes {
            let Some(bait) = hole.bait.as_deref() else {
                continue;
            };
            let display = bait.trim();
            if display.is_empty() {
                continue;
            }
            let key = display.to_lowercase();
            let slot = *index.entry(key).or_insert_with(|| {
                records.push(BaitPerformance {
                    name: display.to_string(),
                    bites: 0,
                    catches: 0,
                });
                records.len() - 1
            });
            records[slot].bites += hole.bite_count;
            records[slot].catches += hole.fish_caught_count;
        }
    }

    records.sort_by(|a, b| b.catches.cmp(&a.catches));
    records
}
