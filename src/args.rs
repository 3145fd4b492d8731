//! Command-line argument definitions.
//!
//! This module defines the CLI surfaced by `live-scout`.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use clap::{Parser, ValueEnum};

/// Which discovery pipelines to run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Only {
    #[default]
    All,
    Installations,
    Data,
}

/// Command-line arguments for `live-scout`.
///
/// Use `--help` to see all options and defaults.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "live-scout",
    about = "Locate Ableton Live installations and their unlock data"
)]
pub struct Args {
    /// Print JSON output (machine readable)
    #[arg(long)]
    pub json: bool,

    /// Suppress all logging output
    #[arg(long)]
    pub no_log: bool,

    /// Run only one of the searches
    #[arg(long, value_enum, default_value_t = Only::All)]
    pub only: Only,

    /// Installation root to search instead of the platform default
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Fail instead of asking for a path when the installation root is missing
    #[arg(long)]
    pub no_prompt: bool,

    /// User configuration directory to search for unlock data
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_links: bool,

    /// Log entries skipped because they could not be read at warn level
    #[arg(long)]
    pub warn_skipped: bool,
}

impl Args {
    pub fn wants_installations(&self) -> bool {
        matches!(self.only, Only::All | Only::Installations)
    }

    pub fn wants_data(&self) -> bool {
        matches!(self.only, Only::All | Only::Data)
    }
}
