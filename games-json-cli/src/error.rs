use thiserror::Error;

use games_json_catalog::CatalogError;
use games_json_sync::SettingsError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog or sidecar file error
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Settings file could not be read
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Logger could not be installed
    #[error("Logging setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
