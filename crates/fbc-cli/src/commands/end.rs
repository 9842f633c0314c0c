//! End-session command.

use std::io::Write;

use anyhow::Result;

use fbc_core::{SessionManager, SessionStore};

pub fn run<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
) -> Result<()> {
    if manager.current_session().holes.is_empty() {
        writeln!(writer, "Current session has no holes; nothing to end.")?;
        return Ok(());
    }

    manager.end_current_session();

    // The session just ended sits at the head of history.
    if let Some(ended) = manager.history().first() {
        writeln!(
            writer,
            "Session ended after {}: {} holes, {} bites, {} fish",
            ended.formatted_duration(),
            ended.holes.len(),
            ended.total_bites(),
            ended.total_fish()
        )?;
    }
    writeln!(writer, "Started a fresh session.")?;

    Ok(())
}
