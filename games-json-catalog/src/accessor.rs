//! Validated access to the two mappings inside a catalog document.
//!
//! `gamesMetadata` maps record keys to catalog records; `gameSUIDsData` maps
//! SUIDs to secondary entries that carry their own `title` copy. Both are
//! optional and read as empty when absent. Only `gamesMetadata` is checked
//! up front; `gameSUIDsData` is checked when a pass asks for the SUID table.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::types::json_kind;

pub const GAMES_METADATA: &str = "gamesMetadata";
pub const GAME_SUIDS_DATA: &str = "gameSUIDsData";

type Object = Map<String, Value>;

fn wrong_shape(field: &str, found: &Value) -> CatalogError {
    CatalogError::schema(format!(
        "`{field}` must be an object, found {}",
        json_kind(found)
    ))
}

fn root_object(doc: &Value) -> Result<&Object, CatalogError> {
    doc.as_object().ok_or_else(|| {
        CatalogError::schema(format!(
            "catalog root must be an object, found {}",
            json_kind(doc)
        ))
    })
}

/// The `gamesMetadata` mapping of a validated root, if present.
fn games_metadata(root: &Object) -> Result<Option<&Object>, CatalogError> {
    match root.get(GAMES_METADATA) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(wrong_shape(GAMES_METADATA, other)),
    }
}

/// Read-only view of a catalog document.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    games: Option<&'a Object>,
}

impl<'a> Catalog<'a> {
    pub fn from_document(doc: &'a Value) -> Result<Self, CatalogError> {
        let root = root_object(doc)?;
        Ok(Self {
            games: games_metadata(root)?,
        })
    }

    /// Number of entries in `gamesMetadata`, malformed ones included.
    pub fn len(&self) -> usize {
        self.games.map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate well-formed records in document order.
    ///
    /// Entries whose value is not an object are skipped with a warning.
    pub fn records(&self) -> impl Iterator<Item = (&'a str, &'a Object)> + use<'a> {
        self.games
            .into_iter()
            .flat_map(|games| games.iter())
            .filter_map(|(key, value)| match value.as_object() {
                Some(record) => Some((key.as_str(), record)),
                None => {
                    warn_malformed(key, value);
                    None
                }
            })
    }
}

fn warn_malformed(key: &str, value: &Value) {
    log::warn!(
        "Skipping malformed record '{}' in {}: expected an object, found {}",
        key,
        GAMES_METADATA,
        json_kind(value)
    );
}

/// Mutable view of a catalog document, for apply passes.
///
/// Holds disjoint borrows of both mappings so a pass can rewrite a record
/// and the SUID table at the same time.
#[derive(Debug)]
pub struct CatalogMut<'a> {
    games: Option<&'a mut Object>,
    suids: Option<&'a mut Value>,
}

impl<'a> CatalogMut<'a> {
    pub fn from_document(doc: &'a mut Value) -> Result<Self, CatalogError> {
        Catalog::from_document(doc)?;

        let mut games = None;
        let mut suids = None;
        if let Some(root) = doc.as_object_mut() {
            for (field, value) in root.iter_mut() {
                match field.as_str() {
                    GAMES_METADATA => games = value.as_object_mut(),
                    GAME_SUIDS_DATA => suids = Some(value),
                    _ => {}
                }
            }
        }
        Ok(Self { games, suids })
    }

    /// Iterate well-formed records mutably, skipping malformed ones with a warning.
    pub fn records_mut(&mut self) -> impl Iterator<Item = (&str, &mut Object)> {
        records_mut(self.games.as_deref_mut())
    }

    /// Split into the record iterator and the SUID table.
    ///
    /// Fails with a schema error if `gameSUIDsData` is present but not an
    /// object. The table remembers which entries held which title at this
    /// point, before any record is touched.
    pub fn split(
        &mut self,
    ) -> Result<(impl Iterator<Item = (&str, &mut Object)>, SuidTable<'_>), CatalogError> {
        let entries = match self.suids.as_deref_mut() {
            None => None,
            Some(Value::Object(entries)) => Some(entries),
            Some(other) => return Err(wrong_shape(GAME_SUIDS_DATA, other)),
        };
        Ok((
            records_mut(self.games.as_deref_mut()),
            SuidTable::new(entries),
        ))
    }
}

fn records_mut(games: Option<&mut Object>) -> impl Iterator<Item = (&str, &mut Object)> {
    games
        .into_iter()
        .flat_map(|games| games.iter_mut())
        .filter_map(|(key, value)| {
            if !value.is_object() {
                warn_malformed(key, value);
                return None;
            }
            value.as_object_mut().map(|record| (key.as_str(), record))
        })
}

/// The `gameSUIDsData` mapping, restricted to title updates.
///
/// Each title owns the entries that carried it when the table was created,
/// so a rename never reaches an entry that an earlier rename in the same
/// pass already moved to a new title.
#[derive(Debug)]
pub struct SuidTable<'a> {
    entries: Option<&'a mut Object>,
    /// Title at creation time → SUIDs carrying it, in document order
    owners: HashMap<String, Vec<String>>,
}

impl<'a> SuidTable<'a> {
    fn new(entries: Option<&'a mut Object>) -> Self {
        let mut owners: HashMap<String, Vec<String>> = HashMap::new();
        for (suid, entry) in entries.iter().flat_map(|entries| entries.iter()) {
            if let Some(title) = entry.get("title").and_then(Value::as_str) {
                owners.entry(title.to_string()).or_default().push(suid.clone());
            }
        }
        Self { entries, owners }
    }

    /// Set `title` to `new` on every entry that was titled `old` when the
    /// table was created.
    ///
    /// Entries are claimed by the first call for their title; later calls
    /// for the same `old` change nothing. Entries that are not objects or
    /// have no string title are left alone. Returns the number of entries
    /// changed.
    pub fn retitle(&mut self, old: &str, new: &str) -> usize {
        let Some(suids) = self.owners.remove(old) else {
            return 0;
        };
        let Some(entries) = self.entries.as_deref_mut() else {
            return 0;
        };
        let mut changed = 0;
        for suid in suids {
            if let Some(Value::String(title)) =
                entries.get_mut(&suid).and_then(|entry| entry.get_mut("title"))
            {
                log::debug!("Retitled {} entry {}: {} -> {}", GAME_SUIDS_DATA, suid, old, new);
                *title = new.to_string();
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_mappings_read_as_empty() {
        let doc = json!({});
        let catalog = Catalog::from_document(&doc).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.records().count(), 0);
    }

    #[test]
    fn test_non_object_root_is_schema_error() {
        let doc = json!([1, 2, 3]);
        assert!(matches!(
            Catalog::from_document(&doc),
            Err(CatalogError::Schema(_))
        ));
    }

    #[test]
    fn test_games_metadata_wrong_shape_is_schema_error() {
        let doc = json!({"gamesMetadata": []});
        let err = Catalog::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("gamesMetadata"));
    }

    #[test]
    fn test_suid_data_shape_is_checked_only_by_split() {
        let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo"}}, "gameSUIDsData": "nope"});
        assert_eq!(Catalog::from_document(&doc).unwrap().records().count(), 1);

        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        assert_eq!(catalog.records_mut().count(), 1);
        let err = catalog.split().err().unwrap();
        assert!(matches!(err, CatalogError::Schema(_)));
        assert!(err.to_string().contains("gameSUIDsData"));
    }

    #[test]
    fn test_records_skip_malformed_entries_in_order() {
        let doc = json!({"gamesMetadata": {
            "b": {"title": "B"},
            "bad": "not a record",
            "a": {"title": "A"}
        }});
        let catalog = Catalog::from_document(&doc).unwrap();
        let keys: Vec<&str> = catalog.records().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_records_mut_allows_edits() {
        let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo"}, "g2": null}});
        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        for (_, record) in catalog.records_mut() {
            record.insert("seen".into(), json!(true));
        }
        assert_eq!(doc["gamesMetadata"]["g1"]["seen"], json!(true));
        assert_eq!(doc["gamesMetadata"]["g2"], Value::Null);
    }

    #[test]
    fn test_split_retitles_matching_suids_only() {
        let mut doc = json!({
            "gamesMetadata": {"g1": {"title": "Foo"}},
            "gameSUIDsData": {
                "s1": {"title": "Foo"},
                "s2": {"title": "Other"},
                "s3": {"title": "Foo", "extra": 1},
                "s4": {"name": "no title"}
            }
        });
        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        let (records, mut suids) = catalog.split().unwrap();
        assert_eq!(records.count(), 1);
        assert_eq!(suids.retitle("Foo", "Bar"), 2);

        assert_eq!(doc["gameSUIDsData"]["s1"]["title"], "Bar");
        assert_eq!(doc["gameSUIDsData"]["s2"]["title"], "Other");
        assert_eq!(doc["gameSUIDsData"]["s3"]["title"], "Bar");
        assert_eq!(doc["gameSUIDsData"]["s3"]["extra"], 1);
    }

    #[test]
    fn test_retitle_without_suid_data_is_noop() {
        let mut doc = json!({"gamesMetadata": {}});
        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        let (_, mut suids) = catalog.split().unwrap();
        assert_eq!(suids.retitle("Foo", "Bar"), 0);
    }

    #[test]
    fn test_retitle_uses_titles_from_before_the_pass() {
        let mut doc = json!({
            "gamesMetadata": {},
            "gameSUIDsData": {
                "s1": {"title": "A"},
                "s2": {"title": "B"}
            }
        });
        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        let (_, mut suids) = catalog.split().unwrap();

        assert_eq!(suids.retitle("A", "B"), 1);
        assert_eq!(suids.retitle("B", "C"), 1);

        assert_eq!(doc["gameSUIDsData"]["s1"]["title"], "B");
        assert_eq!(doc["gameSUIDsData"]["s2"]["title"], "C");
    }

    #[test]
    fn test_retitle_claims_entries_once() {
        let mut doc = json!({"gameSUIDsData": {"s1": {"title": "A"}}});
        let mut catalog = CatalogMut::from_document(&mut doc).unwrap();
        let (_, mut suids) = catalog.split().unwrap();

        assert_eq!(suids.retitle("A", "B"), 1);
        assert_eq!(suids.retitle("A", "B"), 0);
        assert_eq!(doc["gameSUIDsData"]["s1"]["title"], "B");
    }
}
