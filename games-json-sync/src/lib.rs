//! Extract and re-apply controller tags and display titles between the
//! game catalog and its sidecar files.
//!
//! This crate owns the match-and-merge logic: associating sidecar entries
//! with catalog records by title, deciding whether a record needs an update,
//! and propagating a rename to every copy of the title inside the catalog.

pub mod controller;
pub mod index;
pub mod pipeline;
pub mod progress;
pub mod settings;
pub mod titles;

pub use controller::{ControllerApplyStats, apply_controller_records, extract_controller_records};
pub use index::FirstMatchIndex;
pub use pipeline::{
    RunOptions, SyncPaths, backup_controllers, backup_titles, restore_controllers, update_titles,
};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use settings::{
    PathOverrides, PathSource, PathSources, ResolvedPaths, Settings, SettingsError,
    load_settings, resolve_paths, settings_path,
};
pub use titles::{TitleApplyStats, apply_title_renames, extract_title_records};
