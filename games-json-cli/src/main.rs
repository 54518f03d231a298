//! games-json CLI
//!
//! Backs up and restores controller-type tags and display titles between
//! a `games.json` catalog and its sidecar files.

mod cli_types;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;

use cli_types::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.quiet, cli.logfile.as_deref()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let settings_file = games_json_sync::settings_path();

    match commands::dispatch(&cli, &root, &settings_file) {
        Ok(0) => {}
        Ok(failures) => {
            log::error!("{failures} operation(s) failed");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
