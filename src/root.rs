//! Search root resolution.
//!
//! A locator starts from a conventional per-OS default. When that default is missing, a
//! [`RootProvider`] is asked for a replacement: interactively by default, or via a fixed answer
//! for non-interactive callers.

// -- std imports
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

// -- crate imports
use tracing::{debug, info};

// -- module imports
use crate::error::ScoutError;

/// Supplies a replacement root when the default one does not exist.
pub trait RootProvider {
    /// Return a candidate root for the missing `default`.
    ///
    /// The returned path is checked for existence by [`resolve_root`].
    fn provide(&mut self, default: &Path) -> Result<PathBuf, ScoutError>;
}

impl<F> RootProvider for F
where
    F: FnMut(&Path) -> Result<PathBuf, ScoutError>,
{
    fn provide(&mut self, default: &Path) -> Result<PathBuf, ScoutError> {
        self(default)
    }
}

/// Always answers with the same path.
#[derive(Debug, Clone)]
pub struct FixedRoot(pub PathBuf);

impl RootProvider for FixedRoot {
    fn provide(&mut self, _default: &Path) -> Result<PathBuf, ScoutError> {
        Ok(self.0.clone())
    }
}

/// Never offers a replacement; a missing default is reported as [`ScoutError::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl RootProvider for NoPrompt {
    fn provide(&mut self, default: &Path) -> Result<PathBuf, ScoutError> {
        Err(ScoutError::NotFound {
            path: default.to_path_buf(),
        })
    }
}

/// Asks the operator for a path: writes one prompt line and reads one answer line.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read from stdin. Stdout is left for results.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> RootProvider for Prompt<R, W> {
    fn provide(&mut self, default: &Path) -> Result<PathBuf, ScoutError> {
        writeln!(
            self.output,
            "Default path \"{}\" not found, please enter the path to your Ableton Live installation directory:",
            default.display()
        )
        .and_then(|_| self.output.flush())
        .map_err(ScoutError::Input)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(ScoutError::Input)?;
        if read == 0 {
            return Err(ScoutError::Input(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a path was entered",
            )));
        }

        Ok(PathBuf::from(line.trim()))
    }
}

/// Only a definite "not found" counts as missing; other stat failures count as present.
pub(crate) fn is_missing(path: &Path) -> bool {
    matches!(fs::metadata(path), Err(e) if e.kind() == io::ErrorKind::NotFound)
}

/// Resolve the search root for a walk.
///
/// Returns `default` unchanged if it exists, without consulting `provider`. Otherwise asks
/// `provider` once; there is no retry.
///
/// # Errors
/// - [`ScoutError::Input`] if the provider could not read an answer.
/// - [`ScoutError::NotFound`] if the provided path does not exist either.
pub fn resolve_root(
    default: &Path,
    provider: &mut dyn RootProvider,
) -> Result<PathBuf, ScoutError> {
    if !is_missing(default) {
        debug!(root = %default.display(), "Using default root");
        return Ok(default.to_path_buf());
    }

    info!(default = %default.display(), "Default root not found; asking for another");
    let answer = provider.provide(default)?;
    if is_missing(&answer) {
        return Err(ScoutError::NotFound { path: answer });
    }

    debug!(root = %answer.display(), "Using provided root");
    Ok(answer)
}
