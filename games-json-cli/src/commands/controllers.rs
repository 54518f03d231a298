use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use games_json_sync::{LogProgress, RunOptions, SyncPaths};

use crate::error::CliError;

/// Extract controller-type tags into the controller sidecar file.
pub(crate) fn run_backup_controllers(paths: &SyncPaths, options: RunOptions) -> Result<(), CliError> {
    let count = games_json_sync::backup_controllers(paths, options, &LogProgress)?;
    log::info!(
        "  {} {} controller tag(s) backed up",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        count,
    );
    Ok(())
}

/// Restore controller-type tags from the controller sidecar file.
pub(crate) fn run_restore_controllers(
    paths: &SyncPaths,
    options: RunOptions,
) -> Result<(), CliError> {
    let stats = games_json_sync::restore_controllers(paths, options, &LogProgress)?;

    log::info!(
        "  {} {} added, {} already tagged, {} without a sidecar entry",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.added.if_supports_color(Stdout, |t| t.bold()),
        stats.already_tagged,
        stats.unmatched,
    );
    if stats.skipped > 0 {
        log::warn!(
            "  {} {} malformed record(s) skipped",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.skipped,
        );
    }
    Ok(())
}
