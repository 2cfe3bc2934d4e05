//! Error types
//!
//! `SnapshotError` covers the integrity engine (walking, hashing, snapshot
//! persistence). `ApiError` is what the command layer returns and adds the
//! configuration and logging failures on top.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the snapshot/compare engine
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A file or directory could not be opened, read, or written
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted snapshot is not a path -> hex digest mapping
    #[error("Malformed snapshot: {0}")]
    Format(String),

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SnapshotError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
