//! CLI subcommand implementations.

pub mod baits;
pub mod bite;
pub mod end;
pub mod history;
pub mod hole;
pub mod stats;
pub mod status;
pub mod util;
