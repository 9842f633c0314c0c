//! Bite recording command.

use std::io::Write;

use anyhow::Result;

use fbc_core::{SessionManager, SessionStore};

use crate::commands::util::resolve_hole;

pub fn run<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    query: &str,
    caught: bool,
) -> Result<()> {
    let id = resolve_hole(manager.current_session(), query)?;
    manager.add_bite(id, caught);

    if let Some(hole) = manager.current_session().holes.iter().find(|h| h.id == id) {
        let outcome = if caught { "fish caught" } else { "no catch" };
        writeln!(
            writer,
            "Bite at '{}' ({outcome}): {} bites, {} fish",
            hole.name, hole.bite_count, hole.fish_caught_count
        )?;
    }

    Ok(())
}
