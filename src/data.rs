//! Unlock data discovery.
//!
//! Live keeps one directory per installed version under `<config dir>/Ableton`, for example
//! `~/Library/Application Support/Ableton/Live 11` or `%APPDATA%\Ableton\Live 11`. A version
//! directory counts as installation data when it contains an `Unlock` directory somewhere below.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use tracing::{debug, info};

// -- module imports
use crate::{
    error::ScoutError,
    platform::PRODUCT_TOKEN,
    report::{InstallationData, Outcome},
    walk::{self, Visit, WalkOptions, entry_name},
};

/// Directory below the user configuration directory holding Live's per-version data.
const DATA_DIR: &str = "Ableton";

/// Token in the name of the directory holding license information.
const UNLOCK_TOKEN: &str = "Unlock";

/// Finds per-version data directories under the user configuration directory.
#[derive(Debug, Clone, Default)]
pub struct DataLocator {
    config_dir: Option<PathBuf>,
    options: WalkOptions,
}

impl DataLocator {
    /// Locator using the OS user configuration directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` instead of the OS user configuration directory.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// `<config dir>/Ableton`.
    ///
    /// # Errors
    /// - [`ScoutError::ConfigDirUnavailable`] if no override is set and the OS has none.
    pub fn data_root(&self) -> Result<PathBuf, ScoutError> {
        let config = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => dirs::config_dir().ok_or(ScoutError::ConfigDirUnavailable)?,
        };
        Ok(config.join(DATA_DIR))
    }

    /// Walk the data root and collect one record per unlock directory found.
    ///
    /// A missing data root yields nothing. A traversal failure keeps whatever was collected
    /// before it.
    pub fn find(&self) -> Outcome<InstallationData> {
        let root = match self.data_root() {
            Ok(root) => root,
            Err(e) => return Outcome::failed(e),
        };

        debug!(root = %root.display(), "Searching installation data");
        let mut found = Vec::new();
        let res = walk::walk(&root, &self.options, |entry| {
            self.classify(entry, &mut found)
        });

        info!(count = found.len(), "Installation data search finished");
        (found, res).into()
    }

    fn classify(
        &self,
        entry: &walkdir::DirEntry,
        out: &mut Vec<InstallationData>,
    ) -> Result<Visit, ScoutError> {
        if !entry.file_type().is_dir() {
            return Ok(Visit::Continue);
        }
        let name = entry_name(entry);
        if !name.contains(PRODUCT_TOKEN) {
            return Ok(Visit::Continue);
        }

        let candidate = entry.path();
        walk::walk(candidate, &self.options, |inner| {
            if inner.depth() > 0
                && inner.file_type().is_dir()
                && entry_name(inner).contains(UNLOCK_TOKEN)
            {
                info!(name, unlock = %inner.path().display(), "Found installation data");
                out.push(InstallationData {
                    path: candidate.to_path_buf(),
                    name: name.clone(),
                });
            }
            Ok(Visit::Continue)
        })?;

        Ok(Visit::Prune)
    }
}

/// Find installation data under the OS user configuration directory.
pub fn find_installation_data() -> Outcome<InstallationData> {
    DataLocator::new().find()
}
