//! Timestamped copies of the catalog taken before an apply pass.
//!
//! Backups are never pruned or rotated; each invocation of an apply
//! operation leaves exactly one new file behind.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::CatalogError;

/// Which apply operation a backup precedes. Used as the `<op>` part of the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOp {
    Controllers,
    Titles,
}

impl BackupOp {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Controllers => "controllers",
            Self::Titles => "titles",
        }
    }
}

impl fmt::Display for BackupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Backup file name for `catalog`: `<stem>-backup-<op>-<YYYYMMDDHHMMSS>.<ext>`.
pub fn backup_file_name<Tz>(catalog: &Path, op: BackupOp, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let stem = catalog
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "games".to_string());
    let ext = catalog
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string());
    format!("{stem}-backup-{op}-{}.{ext}", at.format("%Y%m%d%H%M%S"))
}

/// Copy `catalog` verbatim to a new backup file and return its path.
///
/// The backup lands in `backup_dir` when given (created if missing),
/// otherwise next to the catalog. A numeric suffix is added if the
/// timestamped name is already taken. Fails with `FileNotFound` when the
/// catalog itself is missing.
pub fn backup_catalog<Tz>(
    catalog: &Path,
    op: BackupOp,
    backup_dir: Option<&Path>,
    at: &DateTime<Tz>,
) -> Result<PathBuf, CatalogError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !catalog.is_file() {
        return Err(CatalogError::FileNotFound {
            path: catalog.to_path_buf(),
        });
    }

    let dir = match backup_dir {
        Some(dir) => dir.to_path_buf(),
        None => catalog
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&dir).map_err(|e| CatalogError::Backup {
        path: dir.clone(),
        source: e,
    })?;

    let target = unique_path(&dir, &backup_file_name(catalog, op, at));
    std::fs::copy(catalog, &target).map_err(|e| CatalogError::Backup {
        path: target.clone(),
        source: e,
    })?;

    log::info!("Backed up {} to {}", catalog.display(), target.display());
    Ok(target)
}

/// `dir/name`, or `dir/<stem>-N.<ext>` for the first free N if that exists.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    (1u32..)
        .map(|n| {
            if ext.is_empty() {
                dir.join(format!("{stem}-{n}"))
            } else {
                dir.join(format!("{stem}-{n}.{ext}"))
            }
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
