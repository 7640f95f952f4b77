//! Logging infrastructure for folderaudit.
//!
//! Structured logging uses the `log` facade and the `env_logger` backend.
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `--verbose` (debug/trace)
//! 3. Default: info level
//!
//! Debug builds prefix each line with a timestamp (and the module path when
//! verbose); release builds print level and message only. Logs go to stderr so
//! they never mix with a JSON report on stdout.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at startup; `env_logger` can only be installed once per process.
/// Repeated calls are ignored.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=normal, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, LineFormat::for_build(verbose));

    if builder.try_init().is_err() {
        return;
    }

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Which prefixes each log line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineFormat {
    timestamp: bool,
    module_path: bool,
}

impl LineFormat {
    /// Debug builds get timestamps, plus module paths when verbose.
    fn for_build(verbose: u8) -> Self {
        let debug_build = cfg!(debug_assertions);
        Self {
            timestamp: debug_build,
            module_path: debug_build && verbose >= 1,
        }
    }
}

fn configure_format(builder: &mut Builder, format: LineFormat) {
    builder.format(move |buf, record| {
        if format.timestamp {
            let timestamp = buf.timestamp_seconds();
            write!(buf, "{timestamp} ")?;
        }

        let level = record.level();
        let style = buf.default_level_style(level);
        write!(buf, "{style}{level:<5}{style:#} ")?;

        if format.module_path {
            write!(buf, "[{}] ", record.module_path().unwrap_or("unknown"))?;
        }
        writeln!(buf, "{}", record.args())
    });
}
