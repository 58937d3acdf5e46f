//! Shared error type across logsink crates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a graceful shutdown (also used by `--help`).
pub const EXIT_OK: u8 = 0;
/// Exit status for configuration and I/O failures.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status the CLI parser uses for usage errors. Never produced by `LogSinkError`.
pub const EXIT_USAGE: u8 = 2;

/// Coarse error classes (stable, used for reporting and exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Invalid configuration or endpoint.
    Config,
    /// Bind/open failures before the receive loop starts.
    Startup,
    /// The ingress transport went away while running.
    Transport,
    /// A record could not be written or synced.
    Persistence,
}

impl ErrorClass {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Config => "CONFIG",
            ErrorClass::Startup => "STARTUP",
            ErrorClass::Transport => "TRANSPORT",
            ErrorClass::Persistence => "PERSISTENCE",
        }
    }

    /// Process exit status for this class.
    ///
    /// Every class maps to `EXIT_FAILURE`; the class is reported in the log
    /// line, not in the status, so scripts only need to tell 0, 1 and 2 apart.
    pub fn exit_code(self) -> u8 {
        EXIT_FAILURE
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LogSinkError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum LogSinkError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    Endpoint { endpoint: String, reason: String },
    #[error("bind {endpoint} failed: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    #[error("open log store {} failed: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ingress closed: {0}")]
    Transport(String),
    #[error("write log store failed: {0}")]
    Persist(#[source] io::Error),
}

impl LogSinkError {
    /// Map to a stable error class.
    pub fn class(&self) -> ErrorClass {
        match self {
            LogSinkError::Config(_) | LogSinkError::Endpoint { .. } => ErrorClass::Config,
            LogSinkError::Bind { .. } | LogSinkError::StoreOpen { .. } => ErrorClass::Startup,
            LogSinkError::Transport(_) => ErrorClass::Transport,
            LogSinkError::Persist(_) => ErrorClass::Persistence,
        }
    }

    /// Process exit status to report for this error.
    pub fn exit_code(&self) -> u8 {
        self.class().exit_code()
    }
}
