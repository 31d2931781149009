//! The fork ring: `N` exclusively held, blocking resources.
//!
//! Each fork is a `Mutex<ForkState>` paired with a `Condvar`.  The mutex is
//! only held for the few instructions that read or write the holder; the
//! long-lived "ownership" of a fork is the `holder` field, so a philosopher
//! can eat for a second without pinning an OS mutex across a sleep.
//!
//! ```text
//! acquire(f, p):  lock → while held && !aborted: wait → holder = p
//! release(f, p):  lock → check holder == p → holder = None → notify_one
//! ```
//!
//! Waiting is a blocking condvar wait with no timeout.  The only way out of
//! a wait other than the fork becoming free is [`ForkSet::abort`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use dine_core::{ForkId, PhilosopherId};
use tracing::{trace, warn};

use crate::{ForkError, ForkResult};

#[derive(Debug, Default)]
struct ForkState {
    holder:  Option<PhilosopherId>,
    retired: bool,
}

#[derive(Debug, Default)]
struct Fork {
    state: Mutex<ForkState>,
    freed: Condvar,
}

/// The set of forks on the table.
///
/// `ForkSet` is `Sync`; the orchestrator owns it and lends `&ForkSet` to
/// every philosopher thread.
#[derive(Debug)]
pub struct ForkSet {
    forks:   Vec<Fork>,
    aborted: AtomicBool,
}

impl ForkSet {
    /// Create `count` unheld forks.
    pub fn new(count: usize) -> Self {
        Self {
            forks:   (0..count).map(|_| Fork::default()).collect(),
            aborted: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Block until `fork` is free, then mark it held by `who`.
    ///
    /// Returns `Aborted` if the table is (or becomes) aborted while waiting,
    /// and `Retired` after [`teardown`][Self::teardown].
    pub fn acquire(&self, fork: ForkId, who: PhilosopherId) -> ForkResult<()> {
        let slot = self.fork(fork)?;
        let mut state = lock(slot, fork)?;
        loop {
            if state.retired {
                return Err(ForkError::Retired(fork));
            }
            if self.is_aborted() {
                return Err(ForkError::Aborted(fork));
            }
            if state.holder.is_none() {
                break;
            }
            state = slot
                .freed
                .wait(state)
                .map_err(|_| ForkError::Poisoned(fork))?;
        }
        state.holder = Some(who);
        trace!(%fork, %who, "fork acquired");
        Ok(())
    }

    /// Mark `fork` free and wake one waiter.
    ///
    /// Only the current holder may release a fork.
    pub fn release(&self, fork: ForkId, who: PhilosopherId) -> ForkResult<()> {
        let slot = self.fork(fork)?;
        let mut state = lock(slot, fork)?;
        if state.retired {
            return Err(ForkError::Retired(fork));
        }
        if state.holder != Some(who) {
            return Err(ForkError::NotHolder {
                fork,
                caller: who,
                holder: state.holder,
            });
        }
        state.holder = None;
        drop(state);
        slot.freed.notify_one();
        trace!(%fork, %who, "fork released");
        Ok(())
    }

    /// Current holder of `fork`, read under its lock.
    pub fn holder(&self, fork: ForkId) -> ForkResult<Option<PhilosopherId>> {
        let slot = self.fork(fork)?;
        Ok(lock(slot, fork)?.holder)
    }

    /// Abort the table: every current and future `acquire` fails with
    /// `Aborted`.  Releases still succeed so forks can be put down.
    ///
    /// Idempotent.
    pub fn abort(&self) {
        if self.aborted.swap(true, Ordering::AcqRel) {
            return;
        }
        warn!(forks = self.forks.len(), "aborting fork set");
        for slot in &self.forks {
            // Taking the lock orders the flag store before any waiter's
            // re-check, so no wakeup is lost.
            let guard = slot.state.lock().unwrap_or_else(PoisonError::into_inner);
            drop(guard);
            slot.freed.notify_all();
        }
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Retire every fork and report every failure found.
    ///
    /// All forks are visited even if earlier ones fail.  A poisoned fork is
    /// recovered, retired, and reported; a fork still held is retired and
    /// reported.  A second call finds nothing new to report.
    pub fn teardown(&self) -> Vec<ForkError> {
        let mut failures = Vec::new();
        for (i, slot) in self.forks.iter().enumerate() {
            let fork = ForkId(i as u32);
            let mut state = match slot.state.lock() {
                Ok(state) => state,
                Err(poisoned) => {
                    failures.push(ForkError::Poisoned(fork));
                    slot.state.clear_poison();
                    poisoned.into_inner()
                }
            };
            if state.retired {
                continue;
            }
            state.retired = true;
            if let Some(holder) = state.holder.take() {
                failures.push(ForkError::HeldAtTeardown { fork, holder });
            }
            drop(state);
            slot.freed.notify_all();
        }
        failures
    }

    fn fork(&self, fork: ForkId) -> ForkResult<&Fork> {
        self.forks
            .get(fork.index())
            .ok_or(ForkError::UnknownFork(fork))
    }

    /// Poison `fork`'s lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self, fork: ForkId) {
        let slot = &self.forks[fork.index()];
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = slot.state.lock();
                    panic!("poisoning {fork} for a test");
                })
                .join();
        });
    }
}

fn lock(slot: &Fork, fork: ForkId) -> ForkResult<MutexGuard<'_, ForkState>> {
    slot.state.lock().map_err(|_| ForkError::Poisoned(fork))
}
