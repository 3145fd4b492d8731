//! Error types for discovery operations.

// -- std imports
use std::{io, path::PathBuf};

/// Errors produced while resolving roots or walking discovery trees.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// A resolved root (default or provided) does not exist on disk.
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading the interactive answer failed.
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    /// The OS did not supply a user configuration directory.
    #[error("user configuration directory unavailable")]
    ConfigDirUnavailable,

    /// A walk root exists but could not be traversed.
    #[error("failed to traverse {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
