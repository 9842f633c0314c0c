//! Fishing bite counter CLI library.
//!
//! This crate provides the command-line interface over the core session
//! manager and the SQLite store.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, HistoryAction, HoleAction};
pub use config::Config;
