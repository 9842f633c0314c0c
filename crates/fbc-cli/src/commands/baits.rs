//! Bait performance command.

use std::io::Write;

use anyhow::Result;
use serde_json::json;

use fbc_core::{SessionManager, SessionStore};

pub fn run<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &SessionManager<S>,
    json: bool,
) -> Result<()> {
    let records = manager.bait_performance();

    if json {
        let value: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "bites": r.bites,
                    "catches": r.catches,
                    "efficiency": r.efficiency(),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &value)?;
        writeln!(writer)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(writer, "No bait data recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Bait performance:")?;
    for record in &records {
        writeln!(
            writer,
            "- {}: {} bites, {} catches ({:.0}%)",
            record.name,
            record.bites,
            record.catches,
            record.efficiency()
        )?;
    }

    Ok(())
}
