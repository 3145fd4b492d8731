//! Locate Ableton Live installations and their unlock data.
//!
//! Two pipelines share one pattern: resolve a root, walk it, prune and classify.
//! - [`find_installations`] walks the platform's program root for Live binaries.
//! - [`find_installation_data`] walks the user configuration directory for unlock data.
//!
//! Both return an [`Outcome`]: the records found plus the error that stopped the search, if
//! any. Use [`InstallationLocator`] and [`DataLocator`] directly to control roots, prompting
//! and walk options.

// -- module definitions
pub mod data;
pub mod error;
pub mod install;
pub mod platform;
pub mod report;
pub mod root;
pub mod walk;

// -- re-exports
pub use data::{DataLocator, find_installation_data};
pub use error::ScoutError;
pub use install::{InstallationLocator, find_installations};
pub use platform::Platform;
pub use report::{Installation, InstallationData, Outcome};
pub use root::{FixedRoot, NoPrompt, Prompt, RootProvider, resolve_root};
pub use walk::{SkipPolicy, Visit, WalkOptions};
