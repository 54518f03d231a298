//! Pipeline progress reporting.

/// Trait for receiving pipeline progress updates.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Restoring controller tags into games.json").
    fn on_phase(&self, message: &str);

    /// Called when the pipeline run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
