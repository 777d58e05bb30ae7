//! Query error types

use thiserror::Error;

/// Result type for condition parsing and evaluation
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the condition language itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator text was not one of the recognized forms
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// Ordering comparison between values of incompatible type classes
    #[error("cannot order {left} against {right}")]
    IncomparableTypes {
        left: &'static str,
        right: &'static str,
    },
}
