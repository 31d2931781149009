//! Configuration error type shared by the `dine-*` crates.

use thiserror::Error;

/// Errors detected before any philosopher is seated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DineError {
    #[error("{0} philosopher(s) cannot dine; find more philosophers to dine")]
    TooFewPhilosophers(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for configuration checks.
pub type DineResult<T> = Result<T, DineError>;
