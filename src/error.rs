use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that can occur while bootstrapping logging
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Configuration document could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The running executable could not be located.
    #[error("could not get a path to the executable for the log directory: {0}")]
    ExecutablePath(#[source] std::io::Error),
    /// The log directory could not be created.
    #[error("could not create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A tier log file could not be opened.
    #[error("could not open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Print a setup failure to stderr.
///
/// Used while the subscriber is not installed yet, so no structured channel
/// exists to carry it.
pub(crate) fn report(err: &Error) {
    eprintln!("[tierlog] Error: {}", err);
}
