//! CLI-specific error types

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised by the shell itself (the engine has its own kinds)
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem
    #[error("configuration error: {0}")]
    Config(String),

    /// stdin/stdout failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A command line that does not fit the grammar
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Stable code for structured error responses
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::Io(_) => "IO_ERROR",
            CliError::Usage(_) => "USAGE_ERROR",
        }
    }
}
