//! File-level pipeline runs: load, back up, transform, write.
//!
//! Each run owns one catalog document for its duration. Inputs are fully
//! parsed before the backup is taken, and the backup is taken before any
//! mutation, so a failure at any step leaves the catalog file as it was.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use games_json_catalog::{
    BackupOp, CatalogError, ControllerRecord, TitleRecord, backup_catalog, load_json,
    load_sidecar, write_json,
};

use crate::controller::{ControllerApplyStats, apply_controller_records, extract_controller_records};
use crate::progress::SyncProgress;
use crate::titles::{TitleApplyStats, apply_title_renames, extract_title_records};

/// Locations of the catalog, its sidecar files, and where backups go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    pub catalog: PathBuf,
    pub controllers: PathBuf,
    pub titles: PathBuf,
    /// Directory for catalog backups; `None` puts them next to the catalog.
    pub backup_dir: Option<PathBuf>,
}

/// Options shared by all pipeline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute and report changes without taking a backup or writing files.
    pub dry_run: bool,
}

/// Write extracted sidecar `rows` to `target`, unless dry-running.
fn write_sidecar<T: serde::Serialize>(
    target: &Path,
    rows: &[T],
    what: &str,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<(), CatalogError> {
    if options.dry_run {
        progress.on_complete(&format!(
            "Dry run: would write {} {} to {}",
            rows.len(),
            what,
            target.display()
        ));
        return Ok(());
    }
    write_json(target, rows)?;
    progress.on_complete(&format!(
        "Wrote {} {} to {}",
        rows.len(),
        what,
        target.display()
    ));
    Ok(())
}

/// Back up the catalog ahead of an apply pass, unless dry-running.
fn backup_before_apply(
    paths: &SyncPaths,
    op: BackupOp,
    options: RunOptions,
) -> Result<Option<PathBuf>, CatalogError> {
    if options.dry_run {
        return Ok(None);
    }
    backup_catalog(&paths.catalog, op, paths.backup_dir.as_deref(), &Local::now()).map(Some)
}

/// Persist an applied catalog if the pass changed it.
fn commit_catalog(
    paths: &SyncPaths,
    doc: &Value,
    changed: bool,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<(), CatalogError> {
    let catalog = paths.catalog.display();
    if options.dry_run {
        let verdict = if changed { "would be updated" } else { "would be unchanged" };
        progress.on_complete(&format!("Dry run: {catalog} {verdict}"));
    } else if changed {
        write_json(&paths.catalog, doc)?;
        progress.on_complete(&format!("Updated games data written to {catalog}"));
    } else {
        progress.on_complete(&format!("No changes needed; {catalog} left as is"));
    }
    Ok(())
}

/// Extract controller tags from the catalog into the controller sidecar.
///
/// Returns the number of sidecar records produced.
pub fn backup_controllers(
    paths: &SyncPaths,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<usize, CatalogError> {
    progress.on_phase(&format!(
        "Backing up controller tags from {}",
        paths.catalog.display()
    ));
    let doc = load_json(&paths.catalog)?;
    let records = extract_controller_records(&doc)?;
    write_sidecar(&paths.controllers, &records, "controller records", options, progress)?;
    Ok(records.len())
}

/// Restore controller tags from the controller sidecar into the catalog.
pub fn restore_controllers(
    paths: &SyncPaths,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<ControllerApplyStats, CatalogError> {
    progress.on_phase(&format!(
        "Restoring controller tags from {} into {}",
        paths.controllers.display(),
        paths.catalog.display()
    ));
    let sidecar: Vec<ControllerRecord> = load_sidecar(&paths.controllers)?;
    let mut doc = load_json(&paths.catalog)?;

    backup_before_apply(paths, BackupOp::Controllers, options)?;
    let stats = apply_controller_records(&mut doc, &sidecar)?;
    commit_catalog(paths, &doc, stats.changed(), options, progress)?;
    Ok(stats)
}

/// Extract every record's title into the title sidecar rename table.
///
/// Returns the number of rows produced.
pub fn backup_titles(
    paths: &SyncPaths,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<usize, CatalogError> {
    progress.on_phase(&format!(
        "Backing up titles from {}",
        paths.catalog.display()
    ));
    let doc = load_json(&paths.catalog)?;
    let rows = extract_title_records(&doc)?;
    write_sidecar(&paths.titles, &rows, "titles", options, progress)?;
    Ok(rows.len())
}

/// Apply the title sidecar rename table to the catalog.
pub fn update_titles(
    paths: &SyncPaths,
    options: RunOptions,
    progress: &dyn SyncProgress,
) -> Result<TitleApplyStats, CatalogError> {
    progress.on_phase(&format!(
        "Updating titles in {} from {}",
        paths.catalog.display(),
        paths.titles.display()
    ));
    let table: Vec<TitleRecord> = load_sidecar(&paths.titles)?;
    let mut doc = load_json(&paths.catalog)?;

    backup_before_apply(paths, BackupOp::Titles, options)?;
    let stats = apply_title_renames(&mut doc, &table)?;
    commit_catalog(paths, &doc, stats.changed(), options, progress)?;
    Ok(stats)
}
