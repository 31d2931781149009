//! Observer trait through which the dinner publishes its status.

use std::sync::Arc;

use dine_table::StatusBoard;

/// Error type returned by observer callbacks.  Boxed so output backends in
/// downstream crates can return their own error types.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type ObserverResult = Result<(), ObserverError>;

/// Callbacks invoked by [`Dinner::run`][crate::Dinner::run].
///
/// `on_transition` is called concurrently from every philosopher thread, so
/// implementors must be `Sync` and must serialise their own output.  An
/// error from any callback is fatal to the run.
///
/// All methods have default no-op implementations.
pub trait DinnerObserver: Sync {
    /// Called once on the orchestrating thread before any philosopher starts.
    fn on_dinner_start(&self, _seats: usize) -> ObserverResult {
        Ok(())
    }

    /// Called by a philosopher right after it changed the board (fork picked
    /// up or put down, activity changed).  Exactly one call per change.
    ///
    /// Never called while the calling philosopher waits on a fork.
    fn on_transition(&self, _board: &StatusBoard) -> ObserverResult {
        Ok(())
    }

    /// Called once on the orchestrating thread after every philosopher has
    /// been joined and the forks torn down.
    fn on_dinner_end(&self) -> ObserverResult {
        Ok(())
    }
}

/// A [`DinnerObserver`] that does nothing.
pub struct NoopObserver;

impl DinnerObserver for NoopObserver {}

impl<O: DinnerObserver + ?Sized> DinnerObserver for &O {
    fn on_dinner_start(&self, seats: usize) -> ObserverResult {
        (**self).on_dinner_start(seats)
    }

    fn on_transition(&self, board: &StatusBoard) -> ObserverResult {
        (**self).on_transition(board)
    }

    fn on_dinner_end(&self) -> ObserverResult {
        (**self).on_dinner_end()
    }
}

impl<O: DinnerObserver + Send + ?Sized> DinnerObserver for Arc<O> {
    fn on_dinner_start(&self, seats: usize) -> ObserverResult {
        (**self).on_dinner_start(seats)
    }

    fn on_transition(&self, board: &StatusBoard) -> ObserverResult {
        (**self).on_transition(board)
    }

    fn on_dinner_end(&self) -> ObserverResult {
        (**self).on_dinner_end()
    }
}
