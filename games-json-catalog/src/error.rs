use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, validating, or writing catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure on a catalog or sidecar file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not valid JSON
    #[error("JSON parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required mapping or sequence has the wrong shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Serializing a document for writing failed
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Copying the catalog to its backup location failed
    #[error("Backup to {} failed: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Map an I/O error on `path`, promoting `NotFound` to [`CatalogError::FileNotFound`].
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
