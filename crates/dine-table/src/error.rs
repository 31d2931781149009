//! Error types for dine-table.

use dine_core::{ForkId, PhilosopherId};
use thiserror::Error;

/// Failures of fork acquisition, release, or teardown.
///
/// Every variant except `HeldAtTeardown` leaves the lock state of the fork
/// unknown to its caller, so the simulation treats all of them as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForkError {
    #[error("{0} does not exist")]
    UnknownFork(ForkId),

    #[error("{0}: lock poisoned by a panicking holder")]
    Poisoned(ForkId),

    #[error("{fork}: released by {caller}, but {}", held_by(.holder))]
    NotHolder {
        fork:   ForkId,
        caller: PhilosopherId,
        holder: Option<PhilosopherId>,
    },

    #[error("{0}: table aborted after a fatal error")]
    Aborted(ForkId),

    #[error("{0}: already torn down")]
    Retired(ForkId),

    #[error("{fork}: still held by {holder} at teardown")]
    HeldAtTeardown {
        fork:   ForkId,
        holder: PhilosopherId,
    },
}

impl ForkError {
    /// `true` for the secondary error seen by philosophers woken by
    /// [`ForkSet::abort`][crate::ForkSet::abort].
    pub fn is_abort(&self) -> bool {
        matches!(self, ForkError::Aborted(_))
    }
}

fn held_by(holder: &Option<PhilosopherId>) -> String {
    match holder {
        Some(h) => format!("held by {h}"),
        None    => "not held".to_string(),
    }
}

/// Alias for `Result<T, ForkError>`.
pub type ForkResult<T> = Result<T, ForkError>;
