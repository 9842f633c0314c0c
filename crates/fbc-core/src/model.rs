//! Entity model: sessions, holes, and bite events.
//!
//! All persisted types use camelCase field names on the wire, matching the
//! JSON records described in the storage schema. Counter fields on [`Hole`]
//! are kept consistent with `bite_history` by the mutation helpers; derived
//! session statistics are recomputed on demand, never cached.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded strike event, optionally resulting in a catch.
///
/// Bites are created exactly once and never mutated; a hole's bite log is
/// only ever cleared en masse via [`Hole::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bite {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub was_caught: bool,
}

impl Bite {
    /// Creates a bite stamped with the current time.
    #[must_use]
    pub fn new(was_caught: bool) -> Self {
        Self::at(Utc::now(), was_caught)
    }

    /// Creates a bite with an explicit timestamp.
    #[must_use]
    pub fn at(timestamp: DateTime<Utc>, was_caught: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            was_caught,
        }
    }
}

/// A tracked fishing spot within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
    pub id: Uuid,
    pub name: String,
    pub bite_count: u32,
    pub fish_caught_count: u32,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub bait: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_bite_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bite_history: Vec<Bite>,
}

impl Hole {
    /// Creates a hole with zero counts and an empty bite log.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bite_count: 0,
            fish_caught_count: 0,
            depth: None,
            bait: None,
            notes: None,
            created_at: Utc::now(),
            last_bite_at: None,
            bite_history: Vec::new(),
        }
    }

    /// Appends a bite stamped now and updates the counters.
    ///
    /// Returns the timestamp of the recorded bite.
    pub fn add_bite(&mut self, was_caught: bool) -> DateTime<Utc> {
        let bite = Bite::new(was_caught);
        let timestamp = bite.timestamp;
        self.bite_count += 1;
        if was_caught {
            self.fish_caught_count += 1;
        }
        self.last_bite_at = Some(timestamp);
        self.bite_history.push(bite);
        timestamp
    }

    /// Clears all recorded bites, keeping name, bait, depth, and notes.
    pub fn reset(&mut self) {
        self.bite_count = 0;
        self.fish_caught_count = 0;
        self.last_bite_at = None;
        self.bite_history.clear();
    }
}

/// One continuous fishing outing bounding an ordered set of holes.
///
/// A session is open while `ended_at` is `None`; it is closed exactly once
/// and is immutable afterwards except for deletion from history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishingSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub holes: Vec<Hole>,
}

impl Default for FishingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FishingSession {
    /// Creates a fresh open session starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            holes: Vec::new(),
        }
    }

    /// Whether the session is still accruing holes and bites.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Sum of bite counts over all holes.
    #[must_use]
    pub fn total_bites(&self) -> u32 {
        self.holes.iter().map(|h| h.bite_count).sum()
    }

    /// Sum of caught fish over all holes.
    #[must_use]
    pub fn total_fish(&self) -> u32 {
        self.holes.iter().map(|h| h.fish_caught_count).sum()
    }

    /// The hole with the most bites; first encountered wins ties.
    #[must_use]
    pub fn most_productive_hole(&self) -> Option<&Hole> {
        self.holes.iter().fold(None, |best, hole| match best {
            Some(b) if b.bite_count >= hole.bite_count => Some(b),
            _ => Some(hole),
        })
    }

    /// Elapsed time from start until `ended_at`, or until now while open.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ended_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Duration rendered as "2h 5m" or "45m".
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        let total_secs = self.duration().num_seconds().max(0);
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m")
        }
    }

    /// Percentage of bites converted to catches; 0 when no bites recorded.
    #[must_use]
    pub fn catch_rate(&self) -> f64 {
        let bites = self.total_bites();
        if bites == 0 {
            0.0
        } else {
            f64::from(self.total_fish()) / f64::from(bites) * 100.0
        }
    }

    /// Bite counts bucketed by hour of day (0-23) in the given timezone.
    ///
    /// Hours without bites are omitted rather than reported as zero.
    pub fn hourly_bite_distribution<Tz: TimeZone>(&self, tz: &Tz) -> BTreeMap<u32, u32> {
        let mut distribution = BTreeMap::new();
        for hole in &self.holes {
            for bite in &hole.bite_history {
                let hour = bite.timestamp.with_timezone(tz).hour();
                *distribution.entry(hour).or_insert(0) += 1;
            }
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn hole_with_bites(name: &str, timestamps: &[(&str, bool)]) -> Hole {
        let mut hole = Hole::new(name);
        for &(ts, caught) in timestamps {
            hole.bite_count += 1;
            if caught {
                hole.fish_caught_count += 1;
            }
            hole.last_bite_at = Some(utc(ts));
            hole.bite_history.push(Bite::at(utc(ts), caught));
        }
        hole
    }

    #[test]
    fn add_bite_maintains_counters_and_last_bite() {
        let mut hole = Hole::new("Spot A");
        hole.add_bite(false);
        let second = hole.add_bite(true);

        assert_eq!(hole.bite_count, 2);
        assert_eq!(hole.fish_caught_count, 1);
        assert_eq!(hole.bite_history.len(), 2);
        assert_eq!(hole.last_bite_at, Some(second));
        assert_eq!(hole.bite_history[1].timestamp, second);
    }

    #[test]
    fn hole_invariants_hold_under_mutation() {
        let mut hole = Hole::new("Spot A");
        for caught in [true, false, true, true, false] {
            hole.add_bite(caught);
            assert_eq!(hole.bite_count as usize, hole.bite_history.len());
            assert_eq!(
                hole.fish_caught_count as usize,
                hole.bite_history.iter().filter(|b| b.was_caught).count()
            );
            assert!(hole.fish_caught_count <= hole.bite_count);
        }
    }

    #[test]
    fn reset_clears_bites_but_keeps_identity() {
        let mut hole = Hole::new("Spot A");
        hole.bait = Some("Worm".to_string());
        hole.depth = Some(3.5);
        hole.notes = Some("under the birch".to_string());
        hole.add_bite(true);
        let id = hole.id;
        let created_at = hole.created_at;

        hole.reset();

        assert_eq!(hole.bite_count, 0);
        assert_eq!(hole.fish_caught_count, 0);
        assert_eq!(hole.last_bite_at, None);
        assert!(hole.bite_history.is_empty());
        assert_eq!(hole.id, id);
        assert_eq!(hole.created_at, created_at);
        assert_eq!(hole.bait.as_deref(), Some("Worm"));
        assert_eq!(hole.depth, Some(3.5));
        assert_eq!(hole.notes.as_deref(), Some("under the birch"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut hole = Hole::new("Spot A");
        hole.add_bite(true);
        hole.reset();
        let once = hole.clone();
        hole.reset();
        assert_eq!(hole, once);
    }

    #[test]
    fn totals_sum_over_holes() {
        let mut session = FishingSession::new();
        session
            .holes
            .push(hole_with_bites("A", &[("2024-06-01T09:10:00Z", true)]));
        session.holes.push(hole_with_bites(
            "B",
            &[
                ("2024-06-01T09:20:00Z", false),
                ("2024-06-01T14:05:00Z", true),
            ],
        ));

        assert_eq!(session.total_bites(), 3);
        assert_eq!(session.total_fish(), 2);
    }

    #[test]
    fn most_productive_hole_prefers_first_on_tie() {
        let mut session = FishingSession::new();
        assert!(session.most_productive_hole().is_none());

        session
            .holes
            .push(hole_with_bites("first", &[("2024-06-01T09:00:00Z", false)]));
        session
            .holes
            .push(hole_with_bites("second", &[("2024-06-01T10:00:00Z", true)]));

        let best = session.most_productive_hole().unwrap();
        assert_eq!(best.name, "first");
    }

    #[test]
    fn most_productive_hole_picks_max() {
        let mut session = FishingSession::new();
        session
            .holes
            .push(hole_with_bites("small", &[("2024-06-01T09:00:00Z", false)]));
        session.holes.push(hole_with_bites(
            "big",
            &[
                ("2024-06-01T10:00:00Z", false),
                ("2024-06-01T11:00:00Z", true),
            ],
        ));

        assert_eq!(session.most_productive_hole().unwrap().name, "big");
    }

    #[test]
    fn duration_of_closed_session() {
        let mut session = FishingSession::new();
        session.started_at = utc("2024-06-01T06:00:00Z");
        session.ended_at = Some(utc("2024-06-01T08:05:00Z"));

        assert_eq!(session.duration().num_seconds(), 7500);
        assert_eq!(session.formatted_duration(), "2h 5m");
    }

    #[test]
    fn formatted_duration_under_an_hour() {
        let mut session = FishingSession::new();
        session.started_at = utc("2024-06-01T06:00:00Z");
        session.ended_at = Some(utc("2024-06-01T06:45:00Z"));

        assert_eq!(session.formatted_duration(), "45m");
    }

    #[test]
    fn catch_rate_is_zero_without_bites() {
        let session = FishingSession::new();
        assert!((session.catch_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn catch_rate_as_percentage() {
        let mut session = FishingSession::new();
        session.holes.push(hole_with_bites(
            "A",
            &[
                ("2024-06-01T09:00:00Z", true),
                ("2024-06-01T09:30:00Z", false),
            ],
        ));
        assert!((session.catch_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hourly_distribution_buckets_local_hours() {
        let mut session = FishingSession::new();
        // UTC timestamps that land on hours 9, 9, and 14 at UTC+2.
        session.holes.push(hole_with_bites(
            "A",
            &[
                ("2024-06-01T07:10:00Z", false),
                ("2024-06-01T07:40:00Z", true),
            ],
        ));
        session
            .holes
            .push(hole_with_bites("B", &[("2024-06-01T12:15:00Z", false)]));

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let distribution = session.hourly_bite_distribution(&tz);

        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution.get(&9), Some(&2));
        assert_eq!(distribution.get(&14), Some(&1));
    }

    #[test]
    fn hourly_distribution_empty_session_has_no_buckets() {
        let session = FishingSession::new();
        assert!(session.hourly_bite_distribution(&Utc).is_empty());
    }

    #[test]
    fn session_serde_uses_camel_case_wire_names() {
        let mut session = FishingSession::new();
        session
            .holes
            .push(hole_with_bites("A", &[("2024-06-01T09:00:00Z", true)]));

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("startedAt").is_some());
        let hole = &json["holes"][0];
        assert!(hole.get("biteCount").is_some());
        assert!(hole.get("fishCaughtCount").is_some());
        assert!(hole.get("lastBiteAt").is_some());
        assert!(hole["biteHistory"][0].get("wasCaught").is_some());
    }

    #[test]
    fn session_serde_roundtrip_preserves_ordering() {
        let mut session = FishingSession::new();
        session
            .holes
            .push(hole_with_bites("first", &[("2024-06-01T09:00:00Z", true)]));
        session
            .holes
            .push(hole_with_bites("second", &[("2024-06-01T10:00:00Z", false)]));

        let json = serde_json::to_string(&session).unwrap();
        let back: FishingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert_eq!(back.holes[0].name, "first");
        assert_eq!(back.holes[1].name, "second");
    }

    #[test]
    fn hole_deserializes_without_optional_fields() {
        let raw = r#"{
            "id": "5f2d7c3a-1b2c-4d5e-8f90-112233445566",
            "name": "bare",
            "biteCount": 0,
            "fishCaughtCount": 0,
            "createdAt": "2024-06-01T06:00:00Z"
        }"#;
        let hole: Hole = serde_json::from_str(raw).unwrap();
        assert_eq!(hole.name, "bare");
        assert!(hole.bait.is_none());
        assert!(hole.bite_history.is_empty());
    }
}
