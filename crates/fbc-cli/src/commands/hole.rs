//! Hole management commands for the current session.

use std::io::Write;

use anyhow::Result;

use fbc_core::{SessionManager, SessionStore};

use crate::commands::util::{format_local, resolve_hole, short_id};

pub fn add<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    name: &str,
    bait: Option<&str>,
    depth: Option<f64>,
    notes: Option<&str>,
) -> Result<()> {
    let id = manager.add_hole(name, bait)?;

    // Depth and notes are not part of the add operation; apply them as an
    // update so the manager persists exactly once per mutation.
    if depth.is_some() || notes.is_some() {
        if let Some(mut hole) = manager
            .current_session()
            .holes
            .iter()
            .find(|h| h.id == id)
            .cloned()
        {
            hole.depth = depth;
            hole.notes = notes.map(str::to_string);
            manager.update_hole(hole);
        }
    }

    writeln!(writer, "Added hole '{name}' [{}]", short_id(id))?;
    Ok(())
}

pub fn list<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &SessionManager<S>,
) -> Result<()> {
    let session = manager.current_session();
    if session.holes.is_empty() {
        writeln!(writer, "No holes in the current session.")?;
        return Ok(());
    }

    for hole in &session.holes {
        writeln!(
            writer,
            "[{}] {}: {} bites, {} fish",
            short_id(hole.id),
            hole.name,
            hole.bite_count,
            hole.fish_caught_count
        )?;
        if let Some(bait) = &hole.bait {
            writeln!(writer, "    bait: {bait}")?;
        }
        if let Some(depth) = hole.depth {
            writeln!(writer, "    depth: {depth} m")?;
        }
        if let Some(notes) = &hole.notes {
            writeln!(writer, "    notes: {notes}")?;
        }
        if let Some(last) = hole.last_bite_at {
            writeln!(writer, "    last bite: {}", format_local(last))?;
        }
    }

    Ok(())
}

pub fn edit<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    query: &str,
    name: Option<&str>,
    bait: Option<&str>,
    depth: Option<f64>,
    notes: Option<&str>,
) -> Result<()> {
    let id = resolve_hole(manager.current_session(), query)?;
    let Some(mut hole) = manager
        .current_session()
        .holes
        .iter()
        .find(|h| h.id == id)
        .cloned()
    else {
        return Ok(());
    };

    if let Some(name) = name {
        hole.name = name.to_string();
    }
    if let Some(bait) = bait {
        hole.bait = Some(bait.to_string());
    }
    if let Some(depth) = depth {
        hole.depth = Some(depth);
    }
    if let Some(notes) = notes {
        hole.notes = Some(notes.to_string());
    }

    let label = hole.name.clone();
    manager.update_hole(hole);
    writeln!(writer, "Updated hole '{label}' [{}]", short_id(id))?;
    Ok(())
}

pub fn delete<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    query: &str,
) -> Result<()> {
    let id = resolve_hole(manager.current_session(), query)?;
    manager.delete_hole(id);
    writeln!(writer, "Deleted hole [{}]", short_id(id))?;
    Ok(())
}

pub fn reset<W: Write, S: SessionStore>(
    writer: &mut W,
    manager: &mut SessionManager<S>,
    query: &str,
) -> Result<()> {
    let id = resolve_hole(manager.current_session(), query)?;
    manager.reset_hole(id);
    writeln!(writer, "Reset hole [{}]; bite log cleared", short_id(id))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use fbc_core::MemoryStore;

    use super::*;

    fn manager() -> SessionManager<MemoryStore> {
        SessionManager::new(MemoryStore::new())
    }

    #[test]
    fn add_with_depth_and_notes_applies_update() {
        let mut mgr = manager();
        let mut output = Vec::new();
        add(
            &mut output,
            &mut mgr,
            "Spot A",
            Some("Worm"),
            Some(3.5),
            Some("north shore"),
        )
        .unwrap();

        let hole = &mgr.current_session().holes[0];
        assert_eq!(hole.bait.as_deref(), Some("Worm"));
        assert_eq!(hole.depth, Some(3.5));
        assert_eq!(hole.notes.as_deref(), Some("north shore"));
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut mgr = manager();
        let mut output = Vec::new();
        let result = add(&mut output, &mut mgr, "  ", None, None, None);
        assert!(result.is_err());
        assert!(mgr.current_session().holes.is_empty());
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let mut mgr = manager();
        let mut output = Vec::new();
        add(&mut output, &mut mgr, "Spot A", Some("Worm"), None, None).unwrap();

        edit(
            &mut output,
            &mut mgr,
            "Spot A",
            Some("Honey hole"),
            None,
            Some(2.0),
            None,
        )
        .unwrap();

        let hole = &mgr.current_session().holes[0];
        assert_eq!(hole.name, "Honey hole");
        assert_eq!(hole.bait.as_deref(), Some("Worm"));
        assert_eq!(hole.depth, Some(2.0));
    }

    #[test]
    fn delete_then_list_is_empty() {
        let mut mgr = manager();
        let mut output = Vec::new();
        add(&mut output, &mut mgr, "Spot A", None, None, None).unwrap();
        delete(&mut output, &mut mgr, "Spot A").unwrap();

        let mut listing = Vec::new();
        list(&mut listing, &mgr).unwrap();
        let listing = String::from_utf8(listing).unwrap();
        assert!(listing.contains("No holes in the current session."));
    }
}
