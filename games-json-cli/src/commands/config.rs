use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use games_json_sync::{PathSource, ResolvedPaths};

/// Show resolved paths and where each one came from.
pub(crate) fn run_config_show(resolved: &ResolvedPaths, settings_file: &Path) {
    log::info!(
        "{}",
        "games-json Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if settings_file.exists() {
        log::info!(
            "  Settings file: {} {}",
            settings_file.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            settings_file.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let paths = &resolved.paths;
    let sources = &resolved.sources;
    let backup_dir = paths
        .backup_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(next to catalog)".to_string());
    let rows: [(&str, String, PathSource); 4] = [
        ("catalog", paths.catalog.display().to_string(), sources.catalog),
        (
            "controllers",
            paths.controllers.display().to_string(),
            sources.controllers,
        ),
        ("titles", paths.titles.display().to_string(), sources.titles),
        ("backup_dir", backup_dir, sources.backup_dir),
    ];

    for (name, value, source) in rows {
        let source_str = format!("({})", source);
        log::info!(
            "  {:<12} {} {}",
            name,
            value.if_supports_color(Stdout, |t| t.cyan()),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path(settings_file: &Path) {
    log::info!("{}", settings_file.display());
}
