//! Seating rules: which forks a philosopher needs and in which order it
//! picks them up.
//!
//! # Acquisition order
//!
//! Philosopher `i` needs fork `i` (left) and fork `(i + 1) % seats` (right).
//! Odd seats pick up left then right; even seats pick up right then left.
//!
//! If every seat used the same order, the state "everybody holds their first
//! fork" would be a cycle of waiters.  With the parity split, at least one
//! fork is the *first* fork of two neighbours (seat 0 and seat 1 both start
//! with fork 1), so the first forks can never be `seats` distinct forks each
//! held by a different philosopher, and the cycle cannot close.

use crate::{ForkId, PhilosopherId};

/// The two forks one philosopher uses, resolved for a table of `seats`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    pub philosopher: PhilosopherId,
    pub left:        ForkId,
    pub right:       ForkId,
}

impl Seat {
    /// Resolve the seat of `philosopher` at a table with `seats` places.
    ///
    /// `seats` must be non-zero; [`DinnerConfig::validate`][crate::DinnerConfig::validate]
    /// rejects tables smaller than two before any seat is built.
    pub fn new(philosopher: PhilosopherId, seats: usize) -> Self {
        let seats = seats.max(1) as u32;
        let i = philosopher.0 % seats;
        Self {
            philosopher,
            left:  ForkId(i),
            right: ForkId((i + 1) % seats),
        }
    }

    /// `(first, second)` fork to acquire.
    #[inline]
    pub fn acquisition_order(&self) -> (ForkId, ForkId) {
        if self.philosopher.0 % 2 == 1 {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        }
    }

    /// `(first, second)` fork to put down after eating.
    ///
    /// Always right then left, independent of parity.  Release order plays
    /// no part in deadlock avoidance.
    #[inline]
    pub fn release_order(&self) -> (ForkId, ForkId) {
        (self.right, self.left)
    }

    /// `true` if `fork` is one of this seat's two forks.
    #[inline]
    pub fn uses(&self, fork: ForkId) -> bool {
        fork == self.left || fork == self.right
    }
}
