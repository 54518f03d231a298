//! Controller-type tag backup and restore.
//!
//! Extraction flattens every controller tag in the catalog into a
//! [`ControllerRecord`]. Restoring matches those records back to catalog
//! records by title and re-adds the tag to any record that lost it.

use serde_json::{Map, Value};

use games_json_catalog::{
    Catalog, CatalogError, CatalogMut, ControllerRecord, Tag, is_controller_tag, json_kind,
    record_title,
};

use crate::index::FirstMatchIndex;

/// Statistics from a single controller apply pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ControllerApplyStats {
    /// Well-formed catalog records visited
    pub records: u64,
    /// Records whose title matched a sidecar entry
    pub matched: u64,
    /// Records that received a controller tag
    pub added: u64,
    /// Matched records that already carried a controller tag
    pub already_tagged: u64,
    /// Records with no sidecar entry for their title
    pub unmatched: u64,
    /// Records skipped because their `title` or `tags` was malformed
    pub skipped: u64,
}

impl ControllerApplyStats {
    /// Returns true if the pass modified the catalog.
    pub fn changed(&self) -> bool {
        self.added > 0
    }
}

/// The record's `tags`, or an empty slice when absent.
///
/// Returns `None` (after a warning) when `tags` is present but not an array.
fn record_tags<'r>(key: &str, record: &'r Map<String, Value>) -> Option<&'r [Value]> {
    match record.get("tags") {
        None => Some(&[]),
        Some(Value::Array(tags)) => Some(tags.as_slice()),
        Some(other) => {
            log::warn!(
                "Skipping record '{}': `tags` is {}, not an array",
                key,
                json_kind(other)
            );
            None
        }
    }
}

fn warn_bad_title(key: &str) {
    log::warn!("Skipping record '{}': `title` is not a string", key);
}

/// Collect one sidecar record per controller tag, in catalog order.
///
/// A record with two controller tags yields two sidecar records.
pub fn extract_controller_records(doc: &Value) -> Result<Vec<ControllerRecord>, CatalogError> {
    let catalog = Catalog::from_document(doc)?;
    let mut records = Vec::new();

    for (key, record) in catalog.records() {
        let Some(title) = record_title(record) else {
            warn_bad_title(key);
            continue;
        };
        let Some(tags) = record_tags(key, record) else {
            continue;
        };

        for tag in tags.iter().filter(|tag| is_controller_tag(tag)) {
            let Some(tag) = tag.as_object() else {
                continue;
            };
            let tag = Tag::from_object(tag);
            log::debug!("Added game: {} with tag: {}", title, tag.name);
            records.push(ControllerRecord::new(key, title, tag));
        }
    }

    log::info!(
        "Extracted {} controller tag(s) from {} catalog record(s)",
        records.len(),
        catalog.len()
    );
    Ok(records)
}

/// Restore controller tags from `sidecar` into the catalog.
///
/// Each catalog record takes the first sidecar entry with its title. A tag
/// is appended only when the record has no controller tag yet, so applying
/// the same sidecar twice adds nothing the second time. Records with no
/// matching entry are not touched.
pub fn apply_controller_records(
    doc: &mut Value,
    sidecar: &[ControllerRecord],
) -> Result<ControllerApplyStats, CatalogError> {
    let index = FirstMatchIndex::build(sidecar, |entry| entry.title.as_str());
    if index.is_empty() {
        log::warn!("Controller sidecar has no usable entries; no tags will be restored");
    } else {
        log::debug!("Indexed {} distinct titles from {} entries", index.len(), sidecar.len());
    }
    for entry in index.shadowed() {
        log::debug!(
            "Ignoring extra controller entry '{}' for '{}': only the first entry per title applies",
            entry.name,
            entry.title
        );
    }

    let mut catalog = CatalogMut::from_document(doc)?;
    let mut stats = ControllerApplyStats::default();

    for (key, record) in catalog.records_mut() {
        stats.records += 1;

        let Some(title) = record_title(record) else {
            warn_bad_title(key);
            stats.skipped += 1;
            continue;
        };
        let Some(entry) = index.first_match(title) else {
            stats.unmatched += 1;
            continue;
        };
        stats.matched += 1;

        let Value::Array(tags) = record
            .entry("tags")
            .or_insert_with(|| Value::Array(Vec::new()))
        else {
            log::warn!("Skipping record '{}': `tags` is not an array", key);
            stats.skipped += 1;
            continue;
        };

        if tags.iter().any(is_controller_tag) {
            log::debug!("Game already has controller data: {}", entry.title);
            stats.already_tagged += 1;
            continue;
        }

        tags.push(entry.tag().to_value());
        stats.added += 1;
        log::debug!("Added controller data to game: {} ({})", entry.title, key);
    }

    log::info!(
        "Controller restore over {} record(s): {} matched, {} added, {} already tagged, {} unmatched, {} skipped",
        stats.records,
        stats.matched,
        stats.added,
        stats.already_tagged,
        stats.unmatched,
        stats.skipped
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
