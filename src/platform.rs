//! Per-platform installation layouts.
//!
//! Each supported host lays out Ableton Live differently:
//! - Windows: `C:\ProgramData\Ableton\<Edition>\Program\<Edition>.exe`
//! - macOS: `/Applications/Ableton Live <Edition>.app/Contents/MacOS/Live`
//!
//! [`Platform`] is picked once from the host identity and then supplies the default root and
//! the classification of walked entries.

// -- std imports
use std::{
    env,
    path::{Path, PathBuf},
};

// -- crate imports
use tracing::{debug, info};
use walkdir::DirEntry;

// -- module imports
use crate::{
    error::ScoutError,
    report::Installation,
    walk::{self, Visit, WalkOptions, entry_name},
};

/// Token every Live install directory, executable and data directory carries in its name.
pub(crate) const PRODUCT_TOKEN: &str = "Live";

const WINDOWS_DEFAULT_ROOT: &str = r"C:\ProgramData\Ableton";
const WINDOWS_PROGRAM_DIR: &str = "Program";
const WINDOWS_EXE_MARKER: &str = ".exe";

const DARWIN_DEFAULT_ROOT: &str = "/Applications";
const DARWIN_BUNDLE_TOKEN: &str = "Ableton Live";
const DARWIN_BUNDLE_PREFIX: &str = "Ableton ";
const DARWIN_BUNDLE_SUFFIX: &str = ".app";
const DARWIN_BINARY: [&str; 3] = ["Contents", "MacOS", "Live"];

/// Host platforms with a known installation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
}

impl Platform {
    /// Detect the host platform.
    ///
    /// # Errors
    /// - [`ScoutError::UnsupportedPlatform`] for anything other than Windows or macOS.
    pub fn current() -> Result<Self, ScoutError> {
        Self::from_os(env::consts::OS)
    }

    /// Map an OS identifier as found in [`std::env::consts::OS`].
    pub fn from_os(os: &str) -> Result<Self, ScoutError> {
        match os {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::Darwin),
            other => Err(ScoutError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Conventional installation root.
    pub fn default_root(self) -> PathBuf {
        match self {
            Self::Windows => PathBuf::from(WINDOWS_DEFAULT_ROOT),
            Self::Darwin => PathBuf::from(DARWIN_DEFAULT_ROOT),
        }
    }

    /// Classify one entry of the outer walk, appending any installations it yields.
    ///
    /// Returns [`Visit::Prune`] once the entry is recognized as an installation boundary,
    /// whether or not a binary was found in it.
    ///
    /// # Errors
    /// - [`ScoutError::Traversal`] if the nested `Program` walk fails (Windows).
    pub fn classify(
        self,
        entry: &DirEntry,
        opts: &WalkOptions,
        out: &mut Vec<Installation>,
    ) -> Result<Visit, ScoutError> {
        if !entry.file_type().is_dir() {
            return Ok(Visit::Continue);
        }

        match self {
            Self::Windows => classify_windows(entry, opts, out),
            Self::Darwin => Ok(classify_darwin(entry, out)),
        }
    }
}

fn classify_windows(
    entry: &DirEntry,
    opts: &WalkOptions,
    out: &mut Vec<Installation>,
) -> Result<Visit, ScoutError> {
    let name = entry_name(entry);
    if !name.contains(PRODUCT_TOKEN) {
        return Ok(Visit::Continue);
    }

    let program_dir = entry.path().join(WINDOWS_PROGRAM_DIR);
    debug!(candidate = %entry.path().display(), "Searching Program directory");

    walk::walk(&program_dir, opts, |e| {
        if is_windows_executable(e) {
            info!(name, path = %e.path().display(), "Found installation");
            out.push(Installation {
                path: e.path().to_path_buf(),
                name: name.clone(),
            });
        }
        Ok(Visit::Continue)
    })?;

    Ok(Visit::Prune)
}

fn is_windows_executable(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }
    let name = entry_name(entry);
    name.contains(PRODUCT_TOKEN) && name.contains(WINDOWS_EXE_MARKER)
}

fn classify_darwin(entry: &DirEntry, out: &mut Vec<Installation>) -> Visit {
    let dir_name = entry_name(entry);
    if !dir_name.contains(DARWIN_BUNDLE_TOKEN) {
        return Visit::Continue;
    }

    let binary: PathBuf = DARWIN_BINARY
        .iter()
        .fold(entry.path().to_path_buf(), |p, part| p.join(part));
    let name = bundle_display_name(&dir_name);

    if is_file(&binary) {
        info!(name, path = %binary.display(), "Found installation");
        out.push(Installation { path: binary, name });
    } else {
        debug!(bundle = %entry.path().display(), "Bundle has no Live binary");
    }

    Visit::Prune
}

/// `Ableton Live 11 Suite.app` -> `Live 11 Suite`.
fn bundle_display_name(bundle: &str) -> String {
    let name = bundle.strip_prefix(DARWIN_BUNDLE_PREFIX).unwrap_or(bundle);
    name.strip_suffix(DARWIN_BUNDLE_SUFFIX)
        .unwrap_or(name)
        .to_string()
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_os_maps_supported_hosts() {
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::Darwin);
    }

    #[test]
    fn from_os_rejects_other_hosts() {
        let err = Platform::from_os("linux").unwrap_err();
        assert!(matches!(err, ScoutError::UnsupportedPlatform(os) if os == "linux"));
    }

    #[test]
    fn default_roots() {
        assert_eq!(
            Platform::Darwin.default_root(),
            PathBuf::from("/Applications")
        );
        assert_eq!(
            Platform::Windows.default_root(),
            PathBuf::from(r"C:\ProgramData\Ableton")
        );
    }

    #[test]
    fn bundle_display_name_strips_prefix_and_suffix() {
        assert_eq!(bundle_display_name("Ableton Live 11 Suite.app"), "Live 11 Suite");
        assert_eq!(bundle_display_name("Ableton Live 10 Lite.app"), "Live 10 Lite");
        assert_eq!(bundle_display_name("My Ableton Live"), "My Ableton Live");
    }
}
