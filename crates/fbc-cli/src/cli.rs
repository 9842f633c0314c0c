//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fishing session tracker.
///
/// Tracks holes and bites in the current fishing session and keeps a history
/// of past sessions with aggregated statistics.
#[derive(Debug, Parser)]
#[command(name = "fbc", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current session at a glance.
    Status,

    /// Manage holes in the current session.
    Hole {
        #[command(subcommand)]
        action: HoleAction,
    },

    /// Record a bite at a hole.
    Bite {
        /// Hole to record against (UUID prefix or exact name).
        hole: String,

        /// Mark the bite as a caught fish.
        #[arg(long)]
        caught: bool,
    },

    /// End the current session and move it to history.
    End,

    /// Show or manage past sessions.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show statistics for the current session.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show bait performance across history and the current session.
    Baits {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Hole management actions.
#[derive(Debug, Subcommand)]
pub enum HoleAction {
    /// Add a hole to the current session.
    Add {
        /// Name of the new hole.
        name: String,

        /// Bait in use at this hole.
        #[arg(long)]
        bait: Option<String>,

        /// Water depth in meters.
        #[arg(long)]
        depth: Option<f64>,

        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// List holes in the current session.
    List,

    /// Edit fields of an existing hole.
    Edit {
        /// Hole to edit (UUID prefix or exact name).
        hole: String,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// New bait.
        #[arg(long)]
        bait: Option<String>,

        /// New depth in meters.
        #[arg(long)]
        depth: Option<f64>,

        /// New notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a hole from the current session.
    Delete {
        /// Hole to remove (UUID prefix or exact name).
        hole: String,
    },

    /// Clear all recorded bites for a hole.
    Reset {
        /// Hole to reset (UUID prefix or exact name).
        hole: String,
    },
}

/// History management actions.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// Delete one past session (UUID prefix accepted).
    Delete {
        /// Session to delete.
        session: String,
    },

    /// Delete all past sessions.
    Clear,
}
