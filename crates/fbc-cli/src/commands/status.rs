//! Status command for showing the current session at a glance.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use fbc_core::{SessionManager, SessionStore};

use crate::commands::util::{format_local, short_id};

pub fn run<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &SessionManager<S>,
    database_path: &Path,
) -> Result<()> {
    let session = manager.current_session();

    writeln!(writer, "Fishing bite counter status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(
        writer,
        "Session started: {}",
        format_local(session.started_at)
    )?;
    writeln!(writer, "Past sessions: {}", manager.history().len())?;

    if session.holes.is_empty() {
        writeln!(writer, "No holes yet.")?;
        return Ok(());
    }

    writeln!(writer, "Holes:")?;
    for hole in &session.holes {
        let bait = hole
            .bait
            .as_deref()
            .map(|b| format!(", bait {b}"))
            .unwrap_or_default();
        writeln!(
            writer,
            "- [{}] {}: {} bites, {} fish{}",
            short_id(hole.id),
            hole.name,
            hole.bite_count,
            hole.fish_caught_count,
            bait
        )?;
    }

    Ok(())
}
