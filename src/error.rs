//! Error types for URL extraction

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting URLs from message files.
///
/// Malformed MIME, empty bodies and missing category directories are not
/// errors: they degrade to empty values and are only logged.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The message file could not be opened or read
    #[error("Failed to read message file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A results or summary document could not be written
    #[error("Failed to write output document {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration file
    #[error("Invalid configuration in {}: {details}", .path.display())]
    Config { path: PathBuf, details: String },

    /// The worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
