//! Logging for the arm executables
//!
//! Two outputs are set up. The terminal carries the operator's diagnostic stream at the configured
//! level with coloured level tags. The session log file always records down to at least `Debug`,
//! tagged with the emitting module, so a full motion trail survives a run at `Info`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{info, Level};
use std::{cmp, fmt, path::PathBuf};
use thiserror::Error;

// Internal imports
use crate::session::{self, Session};

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The file log is never less verbose than this.
const FILE_MIN_LEVEL: LevelFilter = LevelFilter::Debug;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Command and sequence diagnostics are logged at INFO, a level of `{0}` would hide them")]
    LevelHidesDiagnostics(LevelFilter),

    #[error("Could not open the session log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("A logger has already been installed: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// `min_level` applies to the terminal and must be `Info` or more verbose. The session's log file
/// gets `min_level` or `Debug`, whichever is more verbose.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(min_level: LevelFilter, session: &Session) -> Result<(), LoggerInitError> {
    check_level(min_level)?;

    let log_file =
        fern::log_file(&session.log_file_path).map_err(|source| LoggerInitError::LogFile {
            path: session.log_file_path.clone(),
            source,
        })?;

    let terminal = fern::Dispatch::new()
        .level(min_level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}",
                session::get_elapsed_seconds(),
                coloured_tag(record.level()),
                message
            ))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .level(file_level(min_level))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                file_line(
                    session::get_elapsed_seconds(),
                    record.level(),
                    record.target(),
                    message
                )
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(file_level(min_level))
        .chain(terminal)
        .chain(file)
        .apply()?;

    info!("Logging initialised");
    if let Some(epoch) = session::get_epoch() {
        info!("    Session epoch: {}", epoch);
    }
    info!("    Terminal level: {:?}", min_level);
    info!("    File level: {:?}", file_level(min_level));
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn check_level(min_level: LevelFilter) -> Result<(), LoggerInitError> {
    match min_level < Level::Info {
        true => Err(LoggerInitError::LevelHidesDiagnostics(min_level)),
        false => Ok(()),
    }
}

/// The file log's level for a given terminal level.
fn file_level(min_level: LevelFilter) -> LevelFilter {
    cmp::max(min_level, FILE_MIN_LEVEL)
}

/// Format one line of the file log.
fn file_line(elapsed_s: f64, level: Level, target: &str, message: &dyn fmt::Display) -> String {
    format!(
        "[{:10.6} {}] {}: {}",
        elapsed_s,
        plain_tag(level),
        target,
        message
    )
}

fn plain_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRC",
        Level::Debug => "DBG",
        Level::Info => "INF",
        Level::Warn => "WRN",
        Level::Error => "ERR",
    }
}

fn coloured_tag(level: Level) -> ColoredString {
    let tag = plain_tag(level);

    match level {
        Level::Trace => tag.dimmed().italic(),
        Level::Debug => tag.dimmed(),
        Level::Info => tag.normal(),
        Level::Warn => tag.yellow(),
        Level::Error => tag.red().bold(),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
