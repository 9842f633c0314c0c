use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fbc_cli::commands::{baits, bite, end, history, hole, stats, status};
use fbc_cli::{Cli, Commands, Config, HistoryAction, HoleAction};
use fbc_core::SessionManager;

/// Load config and open the database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(fbc_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = fbc_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (db, config) = open_database(cli.config.as_deref())?;
    let mut manager = SessionManager::new(db);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Status => status::run(&mut out, &manager, &config.database_path)?,
        Commands::Hole { action } => match action {
            HoleAction::Add {
                name,
                bait,
                depth,
                notes,
            } => hole::add(
                &mut out,
                &mut manager,
                &name,
                bait.as_deref(),
                depth,
                notes.as_deref(),
            )?,
            HoleAction::List => hole::list(&mut out, &manager)?,
            HoleAction::Edit {
                hole: query,
                name,
                bait,
                depth,
                notes,
            } => hole::edit(
                &mut out,
                &mut manager,
                &query,
                name.as_deref(),
                bait.as_deref(),
                depth,
                notes.as_deref(),
            )?,
            HoleAction::Delete { hole: query } => hole::delete(&mut out, &mut manager, &query)?,
            HoleAction::Reset { hole: query } => hole::reset(&mut out, &mut manager, &query)?,
        },
        Commands::Bite {
            hole: query,
            caught,
        } => bite::run(&mut out, &mut manager, &query, caught)?,
        Commands::End => end::run(&mut out, &mut manager)?,
        Commands::History { action, json } => match action {
            None => history::list(&mut out, &manager, json)?,
            Some(HistoryAction::Delete { session }) => {
                history::delete(&mut out, &mut manager, &session)?;
            }
            Some(HistoryAction::Clear) => history::clear(&mut out, &mut manager)?,
        },
        Commands::Stats { json } => stats::run(&mut out, &manager, json)?,
        Commands::Baits { json } => baits::run(&mut out, &manager, json)?,
    }

    // Mutations apply in memory even when a save is skipped; surface that.
    if let Some(e) = manager.take_save_error() {
        eprintln!("warning: last change was not persisted: {e}");
    }

    Ok(())
}
