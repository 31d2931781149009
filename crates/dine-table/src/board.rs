//! The status board: who holds each fork and what each philosopher is doing.
//!
//! # Write ownership
//!
//! No field is ever written by two threads at once:
//!
//! - `activities[p]` is written only by philosopher `p`.
//! - `holders[f]` is written only by the philosopher that currently holds
//!   fork `f` (set right after acquiring, cleared right before releasing).
//!
//! So the board needs no lock of its own.  Fields are atomics written with
//! `Release` and read with `Acquire`, which makes every write visible to the
//! next render without touching a fork.

use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use dine_core::{Activity, ForkId, PhilosopherId, Seat};

/// Live, concurrently updated status of the table.
#[derive(Debug)]
pub struct StatusBoard {
    activities: Vec<AtomicU8>,
    holders:    Vec<AtomicU32>,
}

impl StatusBoard {
    /// A board for `seats` philosophers: everybody transitioning, every fork
    /// unheld.
    pub fn new(seats: usize) -> Self {
        Self {
            activities: (0..seats)
                .map(|_| AtomicU8::new(Activity::Transitioning.as_u8()))
                .collect(),
            holders: (0..seats)
                .map(|_| AtomicU32::new(PhilosopherId::INVALID.0))
                .collect(),
        }
    }

    pub fn seats(&self) -> usize {
        self.activities.len()
    }

    pub fn set_activity(&self, who: PhilosopherId, activity: Activity) {
        if let Some(cell) = self.activities.get(who.index()) {
            cell.store(activity.as_u8(), Ordering::Release);
        }
    }

    pub fn activity(&self, who: PhilosopherId) -> Activity {
        self.activities
            .get(who.index())
            .map(|cell| Activity::from_u8(cell.load(Ordering::Acquire)))
            .unwrap_or_default()
    }

    /// Record `holder` for `fork`; `None` marks it unheld.
    pub fn set_holder(&self, fork: ForkId, holder: Option<PhilosopherId>) {
        if let Some(cell) = self.holders.get(fork.index()) {
            let raw = holder.unwrap_or(PhilosopherId::INVALID).0;
            cell.store(raw, Ordering::Release);
        }
    }

    pub fn holder(&self, fork: ForkId) -> Option<PhilosopherId> {
        self.holders
            .get(fork.index())
            .map(|cell| PhilosopherId(cell.load(Ordering::Acquire)))
            .filter(|id| id.is_valid())
    }

    /// Copy the board into an owned [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            activities: (0..self.seats())
                .map(|i| self.activity(PhilosopherId(i as u32)))
                .collect(),
            holders: (0..self.holders.len())
                .map(|i| self.holder(ForkId(i as u32)))
                .collect(),
        }
    }
}

/// A point-in-time copy of the [`StatusBoard`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Indexed by `PhilosopherId`.
    pub activities: Vec<Activity>,
    /// Indexed by `ForkId`.
    pub holders:    Vec<Option<PhilosopherId>>,
}

impl Snapshot {
    pub fn seats(&self) -> usize {
        self.activities.len()
    }

    pub fn is_eating(&self, who: PhilosopherId) -> bool {
        self.activities.get(who.index()) == Some(&Activity::Eating)
    }

    /// Forks held by `who`, in ascending fork order.
    pub fn forks_held_by(&self, who: PhilosopherId) -> impl Iterator<Item = ForkId> + '_ {
        self.holders
            .iter()
            .enumerate()
            .filter(move |(_, h)| **h == Some(who))
            .map(|(i, _)| ForkId(i as u32))
    }

    /// Every safety-invariant violation visible in this snapshot.  Empty for
    /// a consistent table.
    ///
    /// Checked: an eating philosopher holds both of its own forks; nobody
    /// holds a fork that is not one of its two; no two neighbours eat at
    /// once.
    pub fn violations(&self) -> Vec<String> {
        let seats = self.seats();
        let mut found = Vec::new();
        for i in 0..seats {
            let who = PhilosopherId(i as u32);
            let seat = Seat::new(who, seats);
            let held: Vec<ForkId> = self.forks_held_by(who).collect();

            if let Some(stray) = held.iter().find(|f| !seat.uses(**f)) {
                found.push(format!("{who} holds {stray}, which is not at its seat"));
            }
            if self.is_eating(who) && !(held.contains(&seat.left) && held.contains(&seat.right)) {
                found.push(format!("{who} is eating while holding {} fork(s)", held.len()));
            }
            let neighbour = PhilosopherId(((i + 1) % seats) as u32);
            if neighbour != who && self.is_eating(who) && self.is_eating(neighbour) {
                found.push(format!("neighbours {who} and {neighbour} are both eating"));
            }
        }
        found
    }
}
