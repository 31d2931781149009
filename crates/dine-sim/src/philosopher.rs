//! One philosopher: the eat/think state machine run on its own thread.
//!
//! ```text
//!            ┌──────────────────────── cycles times ───────────────────────┐
//! start ──► pick up first ─► pick up second ─► Eating ─► Transitioning ─►  │
//!           put down right ─► put down left ─► Thinking ─► Transitioning ──┘ ─► done
//! ```
//!
//! Every arrow that changes the board is followed by exactly one
//! `on_transition` call, eight per cycle.

use std::thread;

use dine_core::{Activity, ForkId, PhilosopherId, PhilosopherRng, Seat};
use dine_table::{ForkSet, StatusBoard};
use tracing::{debug, trace};

use crate::{DinnerObserver, SimError, SimResult};

/// Board changes (and therefore observer calls) per eat/think cycle.
pub const TRANSITIONS_PER_CYCLE: u64 = 8;

/// A seated philosopher, borrowing the shared table for the length of the
/// dinner.
pub struct Philosopher<'t, O: DinnerObserver> {
    seat:          Seat,
    cycles:        u32,
    max_dawdle_ms: u64,
    rng:           PhilosopherRng,
    forks:         &'t ForkSet,
    board:         &'t StatusBoard,
    observer:      &'t O,
}

impl<'t, O: DinnerObserver> Philosopher<'t, O> {
    pub fn new(
        seat:          Seat,
        cycles:        u32,
        max_dawdle_ms: u64,
        rng:           PhilosopherRng,
        forks:         &'t ForkSet,
        board:         &'t StatusBoard,
        observer:      &'t O,
    ) -> Self {
        Self { seat, cycles, max_dawdle_ms, rng, forks, board, observer }
    }

    pub fn id(&self) -> PhilosopherId {
        self.seat.philosopher
    }

    /// Run every cycle.  Returns the number of completed meals.
    pub fn dine(mut self) -> SimResult<u32> {
        debug!(philosopher = %self.id(), cycles = self.cycles, "seated");
        let mut meals = 0;
        for _ in 0..self.cycles {
            self.eat()?;
            self.think()?;
            meals += 1;
        }
        debug!(philosopher = %self.id(), meals, "done");
        Ok(meals)
    }

    fn eat(&mut self) -> SimResult<()> {
        let (first, second) = self.seat.acquisition_order();
        self.pick_up(first)?;
        self.pick_up(second)?;

        self.set_activity(Activity::Eating)?;
        self.dawdle();
        self.set_activity(Activity::Transitioning)?;

        let (first, second) = self.seat.release_order();
        self.put_down(first)?;
        self.put_down(second)
    }

    fn think(&mut self) -> SimResult<()> {
        self.set_activity(Activity::Thinking)?;
        self.dawdle();
        self.set_activity(Activity::Transitioning)
    }

    fn pick_up(&self, fork: ForkId) -> SimResult<()> {
        self.forks.acquire(fork, self.id()).map_err(|source| SimError::Fork {
            philosopher: self.id(),
            source,
        })?;
        self.board.set_holder(fork, Some(self.id()));
        self.publish()
    }

    /// The board is cleared before the fork is released so the next holder's
    /// write can never be overwritten by ours.
    fn put_down(&self, fork: ForkId) -> SimResult<()> {
        self.board.set_holder(fork, None);
        self.forks.release(fork, self.id()).map_err(|source| SimError::Fork {
            philosopher: self.id(),
            source,
        })?;
        self.publish()
    }

    fn set_activity(&self, activity: Activity) -> SimResult<()> {
        self.board.set_activity(self.id(), activity);
        self.publish()
    }

    fn publish(&self) -> SimResult<()> {
        self.observer
            .on_transition(self.board)
            .map_err(|source| SimError::Render { philosopher: self.id(), source })
    }

    fn dawdle(&mut self) {
        let pause = self.rng.dawdle(self.max_dawdle_ms);
        trace!(philosopher = %self.id(), ?pause, "dawdling");
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}
