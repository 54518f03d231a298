//! Display-title backup and rename.
//!
//! Extraction writes a rename table with one row per catalog record, both
//! title columns equal. After `update-title` has been edited, applying the
//! table renames each matching record and every duplicated copy of its
//! title: `originData.title`, `game.title`, and the `gameSUIDsData` entries.

use serde_json::{Map, Value};

use games_json_catalog::{
    Catalog, CatalogError, CatalogMut, TitleRecord, json_kind, record_title,
};

use crate::index::FirstMatchIndex;

/// Nested structures inside a catalog record that mirror its `title`.
const MIRRORED_TITLE_FIELDS: [&str; 2] = ["originData", "game"];

/// Statistics from a single title apply pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TitleApplyStats {
    /// Well-formed catalog records visited
    pub records: u64,
    /// Records whose title was changed
    pub renamed: u64,
    /// Matched records whose row had `update-title` equal to `origin-title`
    pub unchanged: u64,
    /// Records with no row for their title
    pub unmatched: u64,
    /// `gameSUIDsData` entries retitled
    pub suid_updates: u64,
    /// Records skipped because their `title` was malformed
    pub skipped: u64,
}

impl TitleApplyStats {
    /// Returns true if the pass modified the catalog.
    pub fn changed(&self) -> bool {
        self.renamed > 0 || self.suid_updates > 0
    }
}

/// Build the rename table: one row per record, in catalog order.
pub fn extract_title_records(doc: &Value) -> Result<Vec<TitleRecord>, CatalogError> {
    let catalog = Catalog::from_document(doc)?;
    let mut rows = Vec::with_capacity(catalog.len());

    for (key, record) in catalog.records() {
        match record_title(record) {
            Some(title) => {
                log::debug!("Added game: {}", title);
                rows.push(TitleRecord::new(key, title));
            }
            None => log::warn!("Skipping record '{}': `title` is not a string", key),
        }
    }

    log::info!("Extracted {} title(s)", rows.len());
    Ok(rows)
}

/// Set `title` inside the nested object `field`, creating it if absent.
///
/// A `field` that exists but is not an object is left alone with a warning.
fn set_mirrored_title(key: &str, record: &mut Map<String, Value>, field: &str, title: &str) {
    match record
        .entry(field)
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(nested) => {
            nested.insert("title".to_string(), Value::String(title.to_string()));
        }
        other => log::warn!(
            "Record '{}': `{}` is {}, not an object; its title was not updated",
            key,
            field,
            json_kind(other)
        ),
    }
}

/// Apply a rename table to the catalog.
///
/// Each record takes the first row whose `origin-title` equals its title.
/// Rows with identical titles change nothing, so the same table can be
/// applied again safely. When two rows share an `origin-title` the first
/// one wins and the conflict is logged.
///
/// `gameSUIDsData` entries are matched on the title they held before the
/// pass, so with rows `A -> B` and `B -> C` an entry titled `A` ends as `B`
/// alongside its record, not `C`.
pub fn apply_title_renames(
    doc: &mut Value,
    table: &[TitleRecord],
) -> Result<TitleApplyStats, CatalogError> {
    let index = FirstMatchIndex::build(table, |row| row.origin_title.as_str());
    if index.is_empty() {
        log::warn!("Title table has no usable rows; no titles will change");
    } else {
        log::debug!("Indexed {} distinct origin titles from {} row(s)", index.len(), table.len());
    }
    for row in index.shadowed() {
        if let Some(winner) = index.first_match(&row.origin_title) {
            if winner.update_title != row.update_title {
                log::warn!(
                    "Conflicting renames for '{}': using '{}', ignoring '{}'",
                    row.origin_title,
                    winner.update_title,
                    row.update_title
                );
            }
        }
    }

    let mut catalog = CatalogMut::from_document(doc)?;
    let (records, mut suids) = catalog.split()?;
    let mut stats = TitleApplyStats::default();

    for (key, record) in records {
        stats.records += 1;

        let Some(title) = record_title(record) else {
            log::warn!("Skipping record '{}': `title` is not a string", key);
            stats.skipped += 1;
            continue;
        };
        let Some(row) = index.first_match(title) else {
            stats.unmatched += 1;
            continue;
        };
        if !row.is_rename() {
            log::debug!("Game already has updated title: {}", title);
            stats.unchanged += 1;
            continue;
        }

        // The row matched on origin-title, so it holds the old title too.
        let (old, new) = (row.origin_title.as_str(), row.update_title.as_str());
        record.insert("title".to_string(), Value::String(new.to_string()));
        for field in MIRRORED_TITLE_FIELDS {
            set_mirrored_title(key, record, field, new);
        }
        stats.suid_updates += suids.retitle(old, new) as u64;
        stats.renamed += 1;
        log::debug!("Updated game title: {} to {}", old, new);
    }

    log::info!(
        "Title update over {} record(s): {} renamed, {} unchanged, {} unmatched, {} SUID entries retitled, {} skipped",
        stats.records,
        stats.renamed,
        stats.unchanged,
        stats.unmatched,
        stats.suid_updates,
        stats.skipped
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "tests/titles_tests.rs"]
mod tests;
