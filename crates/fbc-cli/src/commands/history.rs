//! History listing and management commands.

use std::io::Write;

use anyhow::Result;

use fbc_core::{SessionManager, SessionStore};

use crate::commands::util::{format_local, resolve_history_session, short_id};

pub fn list<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &SessionManager<S>,
    json: bool,
) -> Result<()> {
    let history = manager.history();

    if json {
        serde_json::to_writer_pretty(&mut *writer, history)?;
        writeln!(writer)?;
        return Ok(());
    }

    if history.is_empty() {
        writeln!(writer, "No past sessions.")?;
        return Ok(());
    }

    for session in history {
        writeln!(
            writer,
            "[{}] {} ({}): {} holes, {} bites, {} fish",
            short_id(session.id),
            format_local(session.started_at),
            session.formatted_duration(),
            session.holes.len(),
            session.total_bites(),
            session.total_fish()
        )?;
    }

    Ok(())
}

pub fn delete<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    query: &str,
) -> Result<()> {
    let id = resolve_history_session(manager.history(), query)?;
    manager.delete_history_session(id);
    writeln!(writer, "Deleted session [{}]", short_id(id))?;
    Ok(())
}

pub fn clear<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
) -> Result<()> {
    let count = manager.history().len();
    manager.clear_history();
    writeln!(writer, "Cleared {count} past sessions.")?;
    Ok(())
}
