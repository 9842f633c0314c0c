//! Current-session statistics command.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use serde_json::json;

use fbc_core::{SessionManager, SessionStore};

pub fn run<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &SessionManager<S>,
    json: bool,
) -> Result<()> {
    let session = manager.current_session();
    let distribution = session.hourly_bite_distribution(&Local);

    if json {
        let value = json!({
            "totalHoles": session.holes.len(),
            "totalBites": session.total_bites(),
            "totalFish": session.total_fish(),
            "catchRate": session.catch_rate(),
            "durationSeconds": session.duration().num_seconds(),
            "mostProductiveHole": session.most_productive_hole().map(|h| h.name.clone()),
            "hourlyBites": distribution,
        });
        serde_json::to_writer_pretty(&mut *writer, &value)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Current session")?;
    writeln!(writer, "- Duration: {}", session.formatted_duration())?;
    writeln!(writer, "- Holes: {}", session.holes.len())?;
    writeln!(writer, "- Bites: {}", session.total_bites())?;
    writeln!(writer, "- Fish caught: {}", session.total_fish())?;
    writeln!(writer, "- Catch rate: {:.0}%", session.catch_rate())?;
    if let Some(best) = session.most_productive_hole() {
        if best.bite_count > 0 {
            writeln!(
                writer,
                "- Most productive: {} ({} bites)",
                best.name, best.bite_count
            )?;
        }
    }

    if distribution.is_empty() {
        writeln!(writer, "No bites recorded yet.")?;
    } else {
        writeln!(writer, "Bites by hour:")?;
        for (hour, count) in &distribution {
            writeln!(writer, "- {hour:02}:00: {count}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use fbc_core::{MemoryStore, SessionManager};

    use super::*;

    #[test]
    fn json_output_carries_totals() {
        let mut mgr = SessionManager::new(MemoryStore::new());
        let id = mgr.add_hole("Spot A", None).unwrap();
        mgr.add_bite(id, false);
        mgr.add_bite(id, true);

        let mut output = Vec::new();
        run(&mut output, &mgr, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["totalHoles"], 1);
        assert_eq!(value["totalBites"], 2);
        assert_eq!(value["totalFish"], 1);
        assert_eq!(value["mostProductiveHole"], "Spot A");
        assert!((value["catchRate"].as_f64().unwrap() - 50.0).abs() < f64::EPSILON);
        // Both bites were just recorded, so they share one hour bucket.
        let hourly = value["hourlyBites"].as_object().unwrap();
        assert_eq!(hourly.values().map(|v| v.as_u64().unwrap()).sum::<u64>(), 2);
    }

    #[test]
    fn text_output_for_empty_session() {
        let mgr = SessionManager::new(MemoryStore::new());

        let mut output = Vec::new();
        run(&mut output, &mgr, false).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("- Holes: 0"));
        assert!(output.contains("- Catch rate: 0%"));
        assert!(output.contains("No bites recorded yet."));
        assert!(!output.contains("Most productive"));
    }
}
