//! Discovery records and the partial-result wrapper returned by the locators.
//!
//! The record types are serializable to JSON for machine-readable output and are also used
//! for human-readable printing in `main`.

use crate::error::ScoutError;
use serde::Serialize;
use std::path::PathBuf;

/// An installed application binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    /// Full path to the executable.
    pub path: PathBuf,

    /// Edition name derived from the containing directory or bundle.
    pub name: String,
}

/// A per-installation data directory holding unlock information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationData {
    /// Full path to the data directory.
    pub path: PathBuf,

    /// Name of the data directory, e.g. `Live 11`.
    pub name: String,
}

/// Records collected by a locator plus the error that stopped it, if any.
///
/// A present `error` means `items` may be incomplete, not that they are absent.
#[derive(Debug)]
pub struct Outcome<T> {
    pub items: Vec<T>,
    pub error: Option<ScoutError>,
}

impl<T> Outcome<T> {
    /// An outcome that failed before collecting anything.
    pub fn failed(error: ScoutError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Discard partial items when an error occurred.
    pub fn into_result(self) -> Result<Vec<T>, ScoutError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.items),
        }
    }
}

impl<T> From<(Vec<T>, Result<(), ScoutError>)> for Outcome<T> {
    fn from((items, res): (Vec<T>, Result<(), ScoutError>)) -> Self {
        Self {
            items,
            error: res.err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_result_keeps_items_when_complete() {
        let outcome: Outcome<u8> = (vec![1, 2], Ok(())).into();
        assert!(outcome.is_complete());
        assert_eq!(outcome.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn partial_outcome_keeps_items_and_error() {
        let outcome: Outcome<u8> = (vec![7], Err(ScoutError::ConfigDirUnavailable)).into();
        assert!(!outcome.is_complete());
        assert_eq!(outcome.items, vec![7]);
        assert!(matches!(
            outcome.into_result(),
            Err(ScoutError::ConfigDirUnavailable)
        ));
    }

    #[test]
    fn installation_serializes_with_lowercase_keys() {
        let inst = Installation {
            path: PathBuf::from("/Applications/Ableton Live 11 Suite.app/Contents/MacOS/Live"),
            name: "Live 11 Suite".into(),
        };
        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json["name"], "Live 11 Suite");
        assert!(json["path"].as_str().unwrap().ends_with("MacOS/Live"));
    }
}
