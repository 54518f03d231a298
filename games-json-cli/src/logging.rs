//! Logger setup for the CLI.
//!
//! Normal output goes through `log::info!` to stdout without decoration;
//! warnings and errors go to stderr. `--verbose` adds timestamps and
//! debug-level messages, `--quiet` keeps only warnings and errors.
//! `RUST_LOG` takes precedence when set. With `--logfile` everything goes
//! to the file instead.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Logger, Target, WriteStyle};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::CliError;

/// Console log level for the given verbosity flags. `--verbose` wins over `--quiet`.
pub(crate) fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Returns true for levels that belong on stderr.
pub(crate) fn is_diagnostic(level: Level) -> bool {
    level <= Level::Warn
}

/// Routes warnings and errors to one logger and everything else to another.
struct SplitLogger {
    out: Logger,
    err: Logger,
}

impl SplitLogger {
    fn pick(&self, level: Level) -> &Logger {
        if is_diagnostic(level) { &self.err } else { &self.out }
    }
}

impl Log for SplitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.pick(metadata.level()).enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.pick(record.level()).log(record);
    }

    fn flush(&self) {
        self.out.flush();
        self.err.flush();
    }
}

fn builder(verbose: bool, quiet: bool) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbose, quiet));
    builder.parse_default_env();

    if verbose {
        builder.format_timestamp_secs();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(buf, "error: {}", record.args()),
            Level::Warn => writeln!(buf, "warning: {}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder
}

/// Install the global logger.
pub(crate) fn init(verbose: bool, quiet: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let (logger, max_level): (Box<dyn Log>, LevelFilter) = match logfile {
        Some(path) => {
            let file = File::create(path)?;
            let mut file_builder = builder(verbose, quiet);
            file_builder.write_style(WriteStyle::Never);
            file_builder.target(Target::Pipe(Box::new(strip_ansi_escapes::Writer::new(file))));
            let logger = file_builder.build();
            let max_level = logger.filter();
            (Box::new(logger), max_level)
        }
        None => {
            let out = builder(verbose, quiet).target(Target::Stdout).build();
            let err = builder(verbose, quiet).target(Target::Stderr).build();
            let max_level = out.filter().max(err.filter());
            (Box::new(SplitLogger { out, err }), max_level)
        }
    };

    log::set_boxed_logger(logger)?;
    log::set_max_level(max_level);
    Ok(())
}
