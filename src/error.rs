//! Error types for logwarden
//!
//! Every failure inside the coordination core is recovered locally and
//! reported through the owning logger's warning channel. Only the
//! construction-time directory and file failures reach the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by loggers, the manager and the disk monitor
#[derive(Error, Debug)]
pub enum LoggerError {
    /// An enumerated option was not recognized and a default was substituted
    #[error("Unrecognized {field} '{value}', defaulting to '{default}'")]
    ConfigurationDefault {
        field: &'static str,
        value: String,
        default: String,
    },

    /// The log directory or its volume could not be inspected
    #[error("Filesystem unavailable at {}: {source}", path.display())]
    FilesystemUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single log file could not be evicted
    #[error("Failed to delete log file {}: {source}", path.display())]
    FileDeletionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log call named a severity that does not exist
    #[error("Invalid log level '{0}'")]
    InvalidSeverity(String),

    /// The log directory could not be created
    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened for appending
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LoggerError>;

impl LoggerError {
    /// Whether this error is recovered locally instead of reaching the caller
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LoggerError::LogDirectory { .. } | LoggerError::LogFile { .. }
        )
    }
}
