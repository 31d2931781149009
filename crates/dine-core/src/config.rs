//! Run configuration.

use crate::{DineError, DineResult};

/// Top-level dinner configuration.
///
/// Built by the application crate from command-line flags and handed to the
/// orchestrator, which calls [`validate`][Self::validate] before creating
/// any fork.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DinnerConfig {
    /// Number of philosophers, and therefore of forks.  Default: 5.
    pub seats: usize,

    /// Full eat-then-think cycles each philosopher performs.  Default: 1.
    pub cycles: u32,

    /// Master RNG seed for think/eat intervals.
    pub seed: u64,

    /// Exclusive upper bound of each think/eat interval, in milliseconds.
    /// Default: 1000.  Zero disables sleeping entirely.
    pub max_dawdle_ms: u64,
}

impl DinnerConfig {
    pub const DEFAULT_SEATS: usize = 5;
    pub const DEFAULT_CYCLES: u32 = 1;
    pub const DEFAULT_MAX_DAWDLE_MS: u64 = 1_000;
    /// Seat indices travel as `u32`.
    pub const MAX_SEATS: usize = u32::MAX as usize - 1;

    /// Check the configuration before anything is spawned.
    pub fn validate(&self) -> DineResult<()> {
        if self.seats < 2 {
            return Err(DineError::TooFewPhilosophers(self.seats));
        }
        if self.seats > Self::MAX_SEATS {
            return Err(DineError::Config(format!(
                "{} seats exceeds the maximum of {}",
                self.seats,
                Self::MAX_SEATS
            )));
        }
        Ok(())
    }

    /// Builder-style override of the seat count.
    pub fn with_seats(mut self, seats: usize) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_dawdle_ms(mut self, max_dawdle_ms: u64) -> Self {
        self.max_dawdle_ms = max_dawdle_ms;
        self
    }
}

impl Default for DinnerConfig {
    fn default() -> Self {
        Self {
            seats:         Self::DEFAULT_SEATS,
            cycles:        Self::DEFAULT_CYCLES,
            seed:          0,
            max_dawdle_ms: Self::DEFAULT_MAX_DAWDLE_MS,
        }
    }
}
