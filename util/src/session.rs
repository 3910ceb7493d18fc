//! Session management
//!
//! A session is one execution of an executable. Each session gets its own directory under
//! `$ARM_SEQ_SW_ROOT/<sessions_dir>`, named after the executable and the time it started, which
//! holds the session's log file.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Environment variable pointing at the root of the software installation.
pub const SW_ROOT_ENV_VAR: &str = "ARM_SEQ_SW_ROOT";

/// Timestamp used in session directory names, see `chrono::format::strftime`.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Where the current session writes its files.
#[derive(Clone, Debug)]
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable ({}) is not set", SW_ROOT_ENV_VAR)]
    SwRootNotSet,

    #[error("The software root {0:?} is not a directory")]
    SwRootNotDir(PathBuf),

    #[error("Cannot create the session directory {path:?}: {source}")]
    CannotCreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("A session has already been started in this process")]
    AlreadyStarted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start the process's session under the software root.
    ///
    /// Sets the session epoch, so this can only succeed once per process.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let root = get_sw_root().ok_or(SessionError::SwRootNotSet)?;
        if !root.is_dir() {
            return Err(SessionError::SwRootNotDir(root));
        }

        SESSION_EPOCH
            .try_init_once(Utc::now)
            .map_err(|_| SessionError::AlreadyStarted)?;
        let epoch = get_epoch().ok_or(SessionError::AlreadyStarted)?;

        Self::create(&root.join(sessions_dir), exec_name, epoch)
    }

    /// Create the directory for a session started at `epoch` inside `sessions_root`.
    fn create(
        sessions_root: &Path,
        exec_name: &str,
        epoch: &DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let session_root =
            sessions_root.join(format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT)));

        fs::create_dir_all(&session_root).map_err(|source| SessionError::CannotCreateDir {
            path: session_root.clone(),
            source,
        })?;

        let log_file_path = session_root.join(format!("{}.log", exec_name));

        Ok(Session {
            session_root,
            log_file_path,
        })
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the software installation, or `None` if
/// `ARM_SEQ_SW_ROOT` isn't set.
pub fn get_sw_root() -> Option<PathBuf> {
    std::env::var_os(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

/// Seconds elapsed since the start of the session, `NAN` if no session has started.
pub fn get_elapsed_seconds() -> f64 {
    get_epoch()
        .and_then(|e| time::duration_to_seconds(Utc::now() - *e))
        .unwrap_or(std::f64::NAN)
}

/// The session's epoch, if a session has been started.
pub fn get_epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
