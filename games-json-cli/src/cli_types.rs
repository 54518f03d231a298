//! CLI type definitions: flags, command enums, and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use games_json_sync::PathOverrides;

#[derive(Parser)]
#[command(name = "games-json")]
#[command(
    about = "Back up, restore, and update controller tags and game titles in games.json",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    /// Library root containing games.json (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub ops: OperationFlags,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// File locations; each overrides the settings file and the defaults.
#[derive(Args, Clone, Default)]
pub(crate) struct PathArgs {
    /// Catalog file (default: <root>/games.json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Controller sidecar file (default: <root>/game-controllers.json)
    #[arg(long, global = true)]
    pub controllers: Option<PathBuf>,

    /// Title sidecar file (default: <root>/game-titles.json)
    #[arg(long, global = true)]
    pub titles: Option<PathBuf>,

    /// Directory for catalog backups (default: next to the catalog)
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,
}

impl PathArgs {
    pub fn overrides(&self) -> PathOverrides {
        PathOverrides {
            catalog: self.catalog.clone(),
            controllers: self.controllers.clone(),
            titles: self.titles.clone(),
            backup_dir: self.backup_dir.clone(),
        }
    }
}

/// The four independent operations. Any combination may be given; they run
/// in a fixed order: backup titles, backup controllers, restore controllers,
/// update titles.
#[derive(Args, Clone, Default)]
pub(crate) struct OperationFlags {
    /// Back up all game titles to the title sidecar file
    #[arg(long)]
    pub backup_titles: bool,

    /// Back up all controller-type tags to the controller sidecar file
    #[arg(long)]
    pub backup_controllers: bool,

    /// Restore controller-type tags from the controller sidecar file
    #[arg(long)]
    pub restore_controllers: bool,

    /// Apply edited titles from the title sidecar file
    #[arg(long)]
    pub update_titles: bool,

    /// Show what would change without taking backups or writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl OperationFlags {
    /// Returns true if at least one operation was requested.
    pub fn any(&self) -> bool {
        self.backup_titles || self.backup_controllers || self.restore_controllers || self.update_titles
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Inspect path configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved file paths and where each one came from
    Show,

    /// Print the settings file path
    Path,
}
