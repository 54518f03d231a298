//! Game library catalog data model, accessors, and JSON file I/O.
//!
//! This crate knows the shape of `games.json` and its two sidecar files
//! (`game-controllers.json`, `game-titles.json`) but none of the merge
//! logic. The sync pipelines in `games-json-sync` build on these types.

pub mod accessor;
pub mod backup;
pub mod error;
pub mod json;
pub mod types;

pub use accessor::{Catalog, CatalogMut, GAME_SUIDS_DATA, GAMES_METADATA, SuidTable};
pub use backup::{BackupOp, backup_catalog, backup_file_name};
pub use error::CatalogError;
pub use json::{load_json, load_sidecar, to_pretty_bytes, write_json};
pub use types::*;
