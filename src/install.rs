//! Installation discovery.
//!
//! Resolves the platform's installation root (asking a [`RootProvider`] when the default is
//! missing), walks it and lets the [`Platform`] classify each entry.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use tracing::{debug, info};

// -- module imports
use crate::{
    error::ScoutError,
    platform::Platform,
    report::{Installation, Outcome},
    root::{self, Prompt, RootProvider},
    walk::{self, WalkOptions},
};

/// Finds installed Live binaries for one platform layout.
#[derive(Debug, Clone)]
pub struct InstallationLocator {
    platform: Platform,
    default_root: PathBuf,
    options: WalkOptions,
}

impl InstallationLocator {
    /// Locator for `platform`, starting at its conventional root.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            default_root: platform.default_root(),
            options: WalkOptions::default(),
        }
    }

    /// Locator for the host platform.
    ///
    /// # Errors
    /// - [`ScoutError::UnsupportedPlatform`] on hosts other than Windows and macOS.
    pub fn for_host() -> Result<Self, ScoutError> {
        Platform::current().map(Self::new)
    }

    /// Replace the conventional root. A missing override still goes through the provider.
    pub fn with_default_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.default_root = root.into();
        self
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Walk the installation root and collect every installation found.
    ///
    /// Root resolution failures yield no items. A traversal failure keeps whatever was
    /// collected before it.
    pub fn find(&self, provider: &mut dyn RootProvider) -> Outcome<Installation> {
        let root = match root::resolve_root(&self.default_root, provider) {
            Ok(root) => root,
            Err(e) => return Outcome::failed(e),
        };

        debug!(platform = ?self.platform, root = %root.display(), "Searching installations");
        let mut found = Vec::new();
        let res = walk::walk(&root, &self.options, |entry| {
            self.platform.classify(entry, &self.options, &mut found)
        });

        info!(count = found.len(), "Installation search finished");
        (found, res).into()
    }
}

/// Find installations on the host, prompting on stdin if the default root is missing.
pub fn find_installations() -> Outcome<Installation> {
    match InstallationLocator::for_host() {
        Ok(locator) => locator.find(&mut Prompt::stdin()),
        Err(e) => Outcome::failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::{FixedRoot, NoPrompt};
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"bin").unwrap();
    }

    fn mac_bundle(root: &Path, bundle: &str) -> PathBuf {
        let bin = root.join(bundle).join("Contents/MacOS/Live");
        touch(&bin);
        bin
    }

    fn windows_install(root: &Path, edition: &str) -> PathBuf {
        let exe = root
            .join(edition)
            .join("Program")
            .join(format!("{edition}.exe"));
        touch(&exe);
        exe
    }

    fn sorted_names(items: &[Installation]) -> Vec<String> {
        let mut names: Vec<_> = items.iter().map(|i| i.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn locator_starts_at_platform_default_root() {
        let locator = InstallationLocator::new(Platform::Windows);
        assert_eq!(locator.platform(), Platform::Windows);
        assert_eq!(locator.default_root, Platform::Windows.default_root());

        let moved = InstallationLocator::new(Platform::Darwin).with_default_root("/Volumes/Apps");
        assert_eq!(moved.platform(), Platform::Darwin);
        assert_eq!(moved.default_root, PathBuf::from("/Volumes/Apps"));
    }

    #[test]
    fn darwin_bundle_yields_named_installation() {
        let dir = TempDir::new().unwrap();
        let bin = mac_bundle(dir.path(), "Ableton Live 11 Suite.app");

        let outcome = InstallationLocator::new(Platform::Darwin)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert!(outcome.is_complete());
        assert_eq!(
            outcome.items,
            vec![Installation {
                path: bin,
                name: "Live 11 Suite".into()
            }]
        );
        assert!(outcome.items[0].path.ends_with("Contents/MacOS/Live"));
    }

    #[test]
    fn darwin_bundle_without_binary_is_skipped_and_pruned() {
        let dir = TempDir::new().unwrap();
        // Nested decoy bundle inside an incomplete one must not be found.
        fs::create_dir_all(dir.path().join("Ableton Live 10 Lite.app/Contents/Resources")).unwrap();
        mac_bundle(
            &dir.path().join("Ableton Live 10 Lite.app/Contents/Resources"),
            "Ableton Live Helper.app",
        );

        let outcome = InstallationLocator::new(Platform::Darwin)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert!(outcome.is_complete());
        assert!(outcome.items.is_empty());
    }

    #[test]
    fn darwin_finds_n_layouts_among_unrelated_dirs() {
        let dir = TempDir::new().unwrap();
        mac_bundle(dir.path(), "Ableton Live 11 Suite.app");
        mac_bundle(dir.path(), "Ableton Live 12 Standard.app");
        mac_bundle(&dir.path().join("Music"), "Ableton Live 10 Intro.app");
        fs::create_dir_all(dir.path().join("Safari.app/Contents/MacOS")).unwrap();
        touch(&dir.path().join("Logic Pro.app/Contents/MacOS/Live"));

        let outcome = InstallationLocator::new(Platform::Darwin)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert!(outcome.is_complete());
        assert_eq!(
            sorted_names(&outcome.items),
            vec!["Live 10 Intro", "Live 11 Suite", "Live 12 Standard"]
        );
    }

    #[test]
    fn windows_program_executable_yields_installation() {
        let dir = TempDir::new().unwrap();
        let exe = windows_install(dir.path(), "Ableton Live 11 Suite");
        touch(&dir.path().join("Ableton Live 11 Suite/Program/Readme.txt"));
        touch(&dir.path().join("Ableton Live 11 Suite/Program/Live.dll"));

        let outcome = InstallationLocator::new(Platform::Windows)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert!(outcome.is_complete());
        assert_eq!(
            outcome.items,
            vec![Installation {
                path: exe,
                name: "Ableton Live 11 Suite".into()
            }]
        );
    }

    #[test]
    fn windows_only_program_dir_is_searched_inside_candidate() {
        let dir = TempDir::new().unwrap();
        windows_install(dir.path(), "Ableton Live 12 Suite");
        // Executables outside Program, or deeper candidates, are never reached.
        touch(&dir.path().join("Ableton Live 12 Suite/Resources/Live Extra.exe"));
        windows_install(
            &dir.path().join("Ableton Live 12 Suite/Resources"),
            "Ableton Live Nested",
        );

        let outcome = InstallationLocator::new(Platform::Windows)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert_eq!(sorted_names(&outcome.items), vec!["Ableton Live 12 Suite"]);
    }

    #[test]
    fn windows_candidate_without_program_dir_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Live Packs")).unwrap();
        windows_install(dir.path(), "Ableton Live 10 Standard");

        let outcome = InstallationLocator::new(Platform::Windows)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);

        assert!(outcome.is_complete());
        assert_eq!(sorted_names(&outcome.items), vec!["Ableton Live 10 Standard"]);
    }

    #[test]
    fn repeated_runs_find_the_same_set() {
        let dir = TempDir::new().unwrap();
        windows_install(dir.path(), "Ableton Live 11 Suite");
        windows_install(dir.path(), "Ableton Live 12 Lite");
        let locator = InstallationLocator::new(Platform::Windows).with_default_root(dir.path());

        let first = locator.find(&mut NoPrompt);
        let second = locator.find(&mut NoPrompt);

        assert_eq!(sorted_names(&first.items), sorted_names(&second.items));
        assert_eq!(first.items.len(), 2);
    }

    #[test]
    fn missing_default_uses_provider_answer() {
        let dir = TempDir::new().unwrap();
        mac_bundle(dir.path(), "Ableton Live 11 Suite.app");

        let outcome = InstallationLocator::new(Platform::Darwin)
            .with_default_root(dir.path().join("missing"))
            .find(&mut FixedRoot(dir.path().to_path_buf()));

        assert_eq!(sorted_names(&outcome.items), vec!["Live 11 Suite"]);
    }

    #[test]
    fn missing_default_and_missing_answer_is_not_found() {
        let dir = TempDir::new().unwrap();

        let outcome = InstallationLocator::new(Platform::Windows)
            .with_default_root(dir.path().join("missing"))
            .find(&mut FixedRoot(dir.path().join("typo")));

        assert!(outcome.items.is_empty());
        assert!(matches!(outcome.error, Some(ScoutError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_program_dir_keeps_earlier_results() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        windows_install(dir.path(), "Ableton Live 11 Suite");
        windows_install(dir.path(), "Ableton Live 12 Suite");
        let locked = dir.path().join("Ableton Live 12 Suite/Program");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipping: permission bits are not enforced for this user");
            return;
        }

        let outcome = InstallationLocator::new(Platform::Windows)
            .with_default_root(dir.path())
            .find(&mut NoPrompt);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(outcome.error, Some(ScoutError::Traversal { .. })));
        // Traversal order decides whether the readable install was reached first.
        assert!(outcome.items.len() <= 1);
        assert!(
            outcome
                .items
                .iter()
                .all(|i| i.name == "Ableton Live 11 Suite")
        );
    }
}
