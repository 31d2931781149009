//! Per-philosopher RNG used to pick think and eat intervals.
//!
//! # Seeding
//!
//! Each philosopher gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (philosopher * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive seat numbers across the seed space.  The RNG is
//! moved into the philosopher's thread, so no synchronisation is needed.
//!
//! Intervals are still nondeterministic end to end: the OS scheduler decides
//! who wins each fork.  The seed only fixes the sequence of sleep lengths.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PhilosopherId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-philosopher RNG.
pub struct PhilosopherRng(SmallRng);

impl PhilosopherRng {
    /// Seed deterministically from the run's global seed and a seat.
    pub fn new(global_seed: u64, philosopher: PhilosopherId) -> Self {
        let seed = global_seed ^ (philosopher.0 as u64).wrapping_mul(MIXING_CONSTANT);
        PhilosopherRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a dawdle interval uniformly from `[0, max_ms)` milliseconds.
    ///
    /// `max_ms == 0` always yields `Duration::ZERO`.
    #[inline]
    pub fn dawdle(&mut self, max_ms: u64) -> Duration {
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.0.gen_range(0..max_ms))
    }
}
