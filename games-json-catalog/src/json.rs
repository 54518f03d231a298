//! Reading and writing the catalog and sidecar JSON files.
//!
//! Every write serializes the whole document with 4-space indentation into a
//! sibling temporary file and renames it over the target, so a file is either
//! fully replaced or left as it was.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::CatalogError;
use crate::types::json_kind;

/// Load and parse a JSON document.
pub fn load_json(path: &Path) -> Result<Value, CatalogError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| CatalogError::from_io(path, e))?;
    let value = serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!("Loaded JSON from {}", path.display());
    Ok(value)
}

/// Load a sidecar file: a JSON array whose elements each map to a `T`.
///
/// Elements that do not deserialize are skipped with a warning; the file as
/// a whole must still be a valid array.
pub fn load_sidecar<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let entries = match load_json(path)? {
        Value::Array(entries) => entries,
        other => {
            return Err(CatalogError::schema(format!(
                "{} must contain a JSON array, found {}",
                path.display(),
                json_kind(&other)
            )));
        }
    };

    let total = entries.len();
    let mut records = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!(
                "Skipping malformed entry #{} in {}: {}",
                index,
                path.display(),
                e
            ),
        }
    }
    log::debug!(
        "Read {}/{} sidecar entries from {}",
        records.len(),
        total,
        path.display()
    );
    Ok(records)
}

/// Serialize `data` as pretty-printed JSON with 4-space indentation.
pub fn to_pretty_bytes<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>, CatalogError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `data` to `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), CatalogError> {
    let bytes = to_pretty_bytes(data)?;
    let tmp = tmp_path(path);

    std::fs::write(&tmp, &bytes).map_err(|e| CatalogError::Io {
        path: tmp.clone(),
        source: e,
    })?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        });
    }

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// `games.json` -> `games.json.tmp`, in the same directory.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
