//! Settings file and path resolution.
//!
//! The settings file is `~/.config/games-json/settings.toml`. Every path
//! resolves through the same priority chain: explicit CLI flag, then the
//! `[paths]` table of the settings file, then the default file name under
//! the library root.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::SyncPaths;

pub const DEFAULT_CATALOG_FILE: &str = "games.json";
pub const DEFAULT_CONTROLLERS_FILE: &str = "game-controllers.json";
pub const DEFAULT_TITLES_FILE: &str = "game-titles.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
}

/// The `[paths]` table. Relative paths are resolved against the library root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub controllers: Option<PathBuf>,
    #[serde(default)]
    pub titles: Option<PathBuf>,
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/games-json/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("games-json").join("settings.toml")
}

/// Read a settings file. A missing file is `Ok(None)`, not an error.
pub fn load_settings(path: &Path) -> Result<Option<Settings>, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let settings = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(Some(settings))
}

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Given on the command line.
    Flag,
    /// Read from the settings file.
    SettingsFile,
    /// Built-in default file name.
    Default,
    /// Not set anywhere (only possible for the backup directory).
    Unset,
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
            Self::Unset => write!(f, "not set"),
        }
    }
}

/// Provenance of each resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSources {
    pub catalog: PathSource,
    pub controllers: PathSource,
    pub titles: PathSource,
    pub backup_dir: PathSource,
}

/// Paths given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub catalog: Option<PathBuf>,
    pub controllers: Option<PathBuf>,
    pub titles: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

/// Fully resolved paths plus where each one came from.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub paths: SyncPaths,
    pub sources: PathSources,
}

fn resolve_optional(
    root: &Path,
    flag: Option<&PathBuf>,
    configured: Option<&PathBuf>,
) -> Option<(PathBuf, PathSource)> {
    if let Some(p) = flag {
        return Some((p.clone(), PathSource::Flag));
    }
    configured.map(|p| (root.join(p), PathSource::SettingsFile))
}

fn resolve_file(
    root: &Path,
    flag: Option<&PathBuf>,
    configured: Option<&PathBuf>,
    default: &str,
) -> (PathBuf, PathSource) {
    resolve_optional(root, flag, configured)
        .unwrap_or_else(|| (root.join(default), PathSource::Default))
}

/// Resolve every path using the priority chain:
///
/// 1. CLI override (if `Some`), used as given
/// 2. `[paths]` entry in the settings file, joined onto `root`
/// 3. Default file name under `root` (no default for the backup directory)
pub fn resolve_paths(
    root: &Path,
    overrides: &PathOverrides,
    settings: Option<&Settings>,
) -> ResolvedPaths {
    let configured = settings.map(|s| &s.paths);

    let (catalog, catalog_src) = resolve_file(
        root,
        overrides.catalog.as_ref(),
        configured.and_then(|p| p.catalog.as_ref()),
        DEFAULT_CATALOG_FILE,
    );
    let (controllers, controllers_src) = resolve_file(
        root,
        overrides.controllers.as_ref(),
        configured.and_then(|p| p.controllers.as_ref()),
        DEFAULT_CONTROLLERS_FILE,
    );
    let (titles, titles_src) = resolve_file(
        root,
        overrides.titles.as_ref(),
        configured.and_then(|p| p.titles.as_ref()),
        DEFAULT_TITLES_FILE,
    );
    let (backup_dir, backup_src) = match resolve_optional(
        root,
        overrides.backup_dir.as_ref(),
        configured.and_then(|p| p.backup_dir.as_ref()),
    ) {
        Some((dir, source)) => (Some(dir), source),
        None => (None, PathSource::Unset),
    };

    ResolvedPaths {
        paths: SyncPaths {
            catalog,
            controllers,
            titles,
            backup_dir,
        },
        sources: PathSources {
            catalog: catalog_src,
            controllers: controllers_src,
            titles: titles_src,
            backup_dir: backup_src,
        },
    }
}
