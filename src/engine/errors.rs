//! Engine error types
//!
//! Every failure an operation can report, as one structured kind. None of
//! these are fatal to the process; the shell prints them and the session
//! continues.

use thiserror::Error;

use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation was invoked before any dataset was loaded
    #[error("no dataset loaded")]
    NoDatasetLoaded,

    /// `create` targeted a name whose backing file already exists
    #[error("dataset '{0}' already exists")]
    DatasetAlreadyExists(String),

    /// `load` or `join` targeted a name with no backing file
    #[error("dataset '{0}' not found")]
    DatasetNotFound(String),

    /// `add_record` saw a record whose title is already present
    #[error("a record titled {0} already exists")]
    DuplicateRecordTitle(String),

    /// Operator text was unrecognized, or the operator is not allowed for
    /// the operation (aggregates accept only =, !=, >= and <=)
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// A scanned record lacks a field the operation requires
    #[error("field '{0}' not found in record")]
    FieldNotFoundInRecord(String),

    /// Ordering comparison between values of incompatible type classes
    #[error("cannot order {left} against {right}")]
    IncomparableTypes {
        left: &'static str,
        right: &'static str,
    },

    /// `max`/`min` over a dataset with no records
    #[error("dataset is empty")]
    EmptyDataset,

    /// `average` over zero included records
    #[error("zero records matched; average is undefined")]
    DivisionByZero,

    /// Persistence failure underneath an operation
    #[error(transparent)]
    Store(StoreError),
}

impl EngineError {
    /// Stable machine-readable code for structured error responses
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NoDatasetLoaded => "NO_DATASET_LOADED",
            EngineError::DatasetAlreadyExists(_) => "DATASET_ALREADY_EXISTS",
            EngineError::DatasetNotFound(_) => "DATASET_NOT_FOUND",
            EngineError::DuplicateRecordTitle(_) => "DUPLICATE_RECORD_TITLE",
            EngineError::InvalidOperator(_) => "INVALID_OPERATOR",
            EngineError::FieldNotFoundInRecord(_) => "FIELD_NOT_FOUND",
            EngineError::IncomparableTypes { .. } => "INCOMPARABLE_TYPES",
            EngineError::EmptyDataset => "EMPTY_DATASET",
            EngineError::DivisionByZero => "DIVISION_BY_ZERO",
            EngineError::Store(_) => "STORE_FAILURE",
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(name) => EngineError::DatasetAlreadyExists(name),
            StoreError::NotFound(name) => EngineError::DatasetNotFound(name),
            other => EngineError::Store(other),
        }
    }
}

impl From<QueryError> for EngineError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidOperator(op) => EngineError::InvalidOperator(op),
            QueryError::IncomparableTypes { left, right } => {
                EngineError::IncomparableTypes { left, right }
            }
        }
    }
}
