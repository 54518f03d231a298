//! Data model types for the catalog and its sidecar files.
//!
//! Catalog records themselves stay as `serde_json` maps so that every field
//! this tool does not own survives a load/save cycle untouched. Only the
//! pieces the pipelines read or write (tags and titles) get typed views.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Substring of a tag `name` that marks it as a controller-type tag.
pub const CONTROLLER_MARKER: &str = "Controller Type";

pub const NO_TITLE: &str = "No Title";
pub const NO_ID: &str = "No ID";
pub const NO_ICON: &str = "No Icon";
pub const NO_NAME: &str = "No Name";

// ── Sentinel defaults ───────────────────────────────────────────────────────

fn default_title() -> String {
    NO_TITLE.to_string()
}

fn default_id() -> Value {
    Value::from(NO_ID)
}

fn default_icon() -> Value {
    Value::from(NO_ICON)
}

fn default_name() -> String {
    NO_NAME.to_string()
}

fn default_packages() -> Value {
    Value::Array(Vec::new())
}

/// Read `field` from an object, falling back to `default` when it is absent.
///
/// A present `null` is passed through as-is; only a missing key is defaulted.
pub fn field_or(object: &Map<String, Value>, field: &str, default: impl FnOnce() -> Value) -> Value {
    object.get(field).cloned().unwrap_or_else(default)
}

/// Short human-readable name of a JSON value's type, for log messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Catalog record views ────────────────────────────────────────────────────

/// The display title of a catalog record.
///
/// Returns [`NO_TITLE`] when the record has no `title`, and `None` when the
/// field is present but not a string (a malformed record).
pub fn record_title(record: &Map<String, Value>) -> Option<&str> {
    match record.get("title") {
        None => Some(NO_TITLE),
        Some(Value::String(title)) => Some(title.as_str()),
        Some(_) => None,
    }
}

/// Returns true if a raw tag value is a controller-type tag.
///
/// Tags without a string `name` never count as controller tags.
pub fn is_controller_tag(tag: &Value) -> bool {
    tag.get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| name.contains(CONTROLLER_MARKER))
}

// ── Tag ─────────────────────────────────────────────────────────────────────

/// One entry of a catalog record's `tags` sequence.
///
/// `id`, `icon`, and `packages` are opaque and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default = "default_id")]
    pub id: Value,
    #[serde(default = "default_icon")]
    pub icon: Value,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_packages")]
    pub packages: Value,
}

impl Tag {
    /// Build a tag from a raw catalog tag object, defaulting missing fields.
    ///
    /// A `name` that is present but not a string is replaced by [`NO_NAME`].
    pub fn from_object(tag: &Map<String, Value>) -> Self {
        Self {
            id: field_or(tag, "id", default_id),
            icon: field_or(tag, "icon", default_icon),
            name: tag
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(default_name),
            packages: field_or(tag, "packages", default_packages),
        }
    }

    /// The JSON object form stored in a catalog record's `tags`.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), self.id.clone());
        object.insert("icon".to_string(), self.icon.clone());
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert("packages".to_string(), self.packages.clone());
        Value::Object(object)
    }
}

// ── Controller sidecar ──────────────────────────────────────────────────────

/// A flattened controller tag plus its owning record's key and title.
///
/// One entry of `game-controllers.json`. `title` is the join key; `key` is
/// informational and may be absent from hand-edited files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerRecord {
    #[serde(default)]
    pub key: String,
    pub title: String,
    #[serde(default = "default_id")]
    pub id: Value,
    #[serde(default = "default_icon")]
    pub icon: Value,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_packages")]
    pub packages: Value,
}

impl ControllerRecord {
    pub fn new(key: impl Into<String>, title: impl Into<String>, tag: Tag) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            id: tag.id,
            icon: tag.icon,
            name: tag.name,
            packages: tag.packages,
        }
    }

    /// The tag this record restores into a catalog record.
    pub fn tag(&self) -> Tag {
        Tag {
            id: self.id.clone(),
            icon: self.icon.clone(),
            name: self.name.clone(),
            packages: self.packages.clone(),
        }
    }
}

// ── Title sidecar ───────────────────────────────────────────────────────────

/// One row of the `game-titles.json` rename table.
///
/// `origin_title` is the join key. Both titles start out equal; a person
/// edits `update_title` before the table is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TitleRecord {
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_title")]
    pub origin_title: String,
    #[serde(default = "default_title")]
    pub update_title: String,
}

impl TitleRecord {
    /// A fresh row with both titles set to `title`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            key: key.into(),
            origin_title: title.clone(),
            update_title: title,
        }
    }

    /// Returns true if applying this row would change a title.
    pub fn is_rename(&self) -> bool {
        self.origin_title != self.update_title
    }
}
