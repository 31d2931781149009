//! Error types for dine-output.

use thiserror::Error;

/// Errors that can occur when rendering the status table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("print lock poisoned by a panicking renderer")]
    PrintLockPoisoned,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
