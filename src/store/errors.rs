//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by dataset persistence
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file for a dataset being created already exists
    #[error("dataset '{0}' already exists")]
    AlreadyExists(String),

    /// No backing file exists for the named dataset
    #[error("dataset '{0}' not found")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file is not valid JSON
    #[error("malformed dataset file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file parsed but does not hold an array of objects
    #[error("dataset file {0} does not hold a JSON array of objects")]
    NotAnArray(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
