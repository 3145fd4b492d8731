//! Depth-first directory walking with pruning.
//!
//! Thin layer over [`walkdir`]: a visitor sees every entry and may answer [`Visit::Prune`] to
//! keep the walk out of a directory. Errors on individual entries are skipped according to
//! [`SkipPolicy`]; only a walk root that exists but cannot be read aborts the walk.

// -- std imports
use std::{io, path::Path};

// -- crate imports
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

// -- module imports
use crate::error::ScoutError;

/// What to do with entries whose metadata or contents could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkipPolicy {
    /// Treat as a non-match and log at debug level.
    #[default]
    Debug,
    /// Treat as a non-match and log at warn level, so permission problems are visible.
    Warn,
}

/// Options shared by every walk of a locator call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub follow_links: bool,
    pub skip_policy: SkipPolicy,
}

impl WalkOptions {
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_skip_policy(mut self, policy: SkipPolicy) -> Self {
        self.skip_policy = policy;
        self
    }

    fn skipped(&self, err: &walkdir::Error) {
        let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
        match self.skip_policy {
            SkipPolicy::Debug => debug!(path, error = %err, "Skipping unreadable entry"),
            SkipPolicy::Warn => warn!(path, error = %err, "Skipping unreadable entry"),
        }
    }
}

/// Visitor answer for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not descend into this directory. Ignored for non-directories.
    Prune,
}

/// Walk `root` depth-first, calling `visit` for each entry (the root included, at depth 0).
///
/// A missing root is an empty walk. Visitor errors abort the walk and are returned as is.
///
/// # Errors
/// - [`ScoutError::Traversal`] if `root` exists but cannot be read.
/// - Any error returned by `visit`.
pub fn walk<F>(root: &Path, opts: &WalkOptions, mut visit: F) -> Result<(), ScoutError>
where
    F: FnMut(&DirEntry) -> Result<Visit, ScoutError>,
{
    let mut it = WalkDir::new(root)
        .follow_links(opts.follow_links)
        .into_iter();

    while let Some(next) = it.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) {
                    debug!(root = %root.display(), "Walk root missing; nothing to visit");
                    return Ok(());
                }
                return Err(ScoutError::Traversal {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                opts.skipped(&err);
                continue;
            }
        };

        if visit(&entry)? == Visit::Prune && entry.file_type().is_dir() {
            it.skip_current_dir();
        }
    }

    Ok(())
}

/// Lossy UTF-8 file name of an entry.
pub(crate) fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}
