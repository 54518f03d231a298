pub(crate) mod config;
pub(crate) mod controllers;
pub(crate) mod titles;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use games_json_sync::{ResolvedPaths, RunOptions, SyncPaths, load_settings, resolve_paths};

use crate::cli_types::{Cli, Commands, ConfigAction, OperationFlags, PathArgs};
use crate::error::CliError;

/// Resolve file paths from flags, the settings file at `settings_file`, and defaults.
pub(crate) fn resolve(
    root: &Path,
    args: &PathArgs,
    settings_file: &Path,
) -> Result<ResolvedPaths, CliError> {
    let settings = load_settings(settings_file)?;
    Ok(resolve_paths(root, &args.overrides(), settings.as_ref()))
}

/// Run the parsed command line. Returns the number of operations that failed.
///
/// `config path` is answered before the settings file is read, so it still
/// works when that file is broken.
pub(crate) fn dispatch(cli: &Cli, root: &Path, settings_file: &Path) -> Result<usize, CliError> {
    match &cli.command {
        Some(Commands::Config {
            action: ConfigAction::Path,
        }) => {
            config::run_config_path(settings_file);
            Ok(0)
        }
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => {
            let resolved = resolve(root, &cli.paths, settings_file)?;
            config::run_config_show(&resolved, settings_file);
            Ok(0)
        }
        None => {
            let resolved = resolve(root, &cli.paths, settings_file)?;
            Ok(run_operations(&cli.ops, &resolved.paths))
        }
    }
}

/// Run one requested operation, logging its outcome.
///
/// Returns `false` if it failed. Errors stop here so the remaining
/// operations still run.
fn run_step(label: &str, step: impl FnOnce() -> Result<(), CliError>) -> bool {
    log::info!(
        "{}",
        format!("Starting {label}.").if_supports_color(Stdout, |t| t.bold()),
    );
    match step() {
        Ok(()) => {
            log::info!("Finished {label}.");
            true
        }
        Err(e) => {
            log::error!("{label} failed: {e}");
            false
        }
    }
}

/// Run every requested operation in order: backup titles, backup
/// controllers, restore controllers, update titles.
///
/// Returns the number of operations that failed.
pub(crate) fn run_operations(ops: &OperationFlags, paths: &SyncPaths) -> usize {
    if !ops.any() {
        log::info!("No arguments provided. Use --help to see available options.");
        return 0;
    }

    let options = RunOptions {
        dry_run: ops.dry_run,
    };
    if options.dry_run {
        log::info!(
            "{}",
            "Dry run: no backups or files will be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let steps: [(bool, &str, fn(&SyncPaths, RunOptions) -> Result<(), CliError>); 4] = [
        (
            ops.backup_titles,
            "backup of game titles",
            titles::run_backup_titles,
        ),
        (
            ops.backup_controllers,
            "backup of game controllers",
            controllers::run_backup_controllers,
        ),
        (
            ops.restore_controllers,
            "restoration of game controllers",
            controllers::run_restore_controllers,
        ),
        (
            ops.update_titles,
            "update of game titles",
            titles::run_update_titles,
        ),
    ];

    let mut failures = 0;
    for (requested, label, run) in steps {
        if requested && !run_step(label, || run(paths, options)) {
            failures += 1;
        }
    }
    failures
}
