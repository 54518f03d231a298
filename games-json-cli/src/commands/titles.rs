use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use games_json_sync::{LogProgress, RunOptions, SyncPaths};

use crate::error::CliError;

/// Write the title rename table, one row per catalog record.
pub(crate) fn run_backup_titles(paths: &SyncPaths, options: RunOptions) -> Result<(), CliError> {
    let count = games_json_sync::backup_titles(paths, options, &LogProgress)?;
    log::info!(
        "  {} {} title(s) backed up; edit `update-title` in {} to rename",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        count,
        paths.titles.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Apply edited titles from the rename table.
pub(crate) fn run_update_titles(paths: &SyncPaths, options: RunOptions) -> Result<(), CliError> {
    let stats = games_json_sync::update_titles(paths, options, &LogProgress)?;

    log::info!(
        "  {} {} renamed ({} SUID entries), {} unchanged, {} without a row",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.renamed.if_supports_color(Stdout, |t| t.bold()),
        stats.suid_updates,
        stats.unchanged,
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
