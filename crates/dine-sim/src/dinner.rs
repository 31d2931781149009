//! The `Dinner` struct and its run loop.

use std::any::Any;
use std::io;
use std::thread;

use dine_core::{DinnerConfig, PhilosopherId, PhilosopherRng, Seat};
use dine_table::{ForkSet, StatusBoard};
use tracing::{debug, info, warn};

use crate::{DinnerObserver, Philosopher, SimError, SimResult};

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DinnerReport {
    pub seats:  usize,
    pub cycles: u32,
    /// Completed eat/think cycles, indexed by `PhilosopherId`.
    pub meals:  Vec<u32>,
}

impl DinnerReport {
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().map(|&m| m as u64).sum()
    }
}

/// A laid table, ready to run.
///
/// Create via [`DinnerBuilder`][crate::DinnerBuilder].
pub struct Dinner<O: DinnerObserver> {
    pub config: DinnerConfig,

    /// The fork ring, lent to every philosopher thread.
    pub forks: ForkSet,

    /// The status board, lent to every philosopher thread and rendered by
    /// the observer.
    pub board: StatusBoard,

    pub observer: O,
}

impl<O: DinnerObserver> Dinner<O> {
    /// Seat every philosopher on its own thread, wait for all of them, then
    /// tear the table down.
    ///
    /// Teardown always runs, even after failures.  All failures of the run
    /// are returned together as one [`SimError::Dinner`].
    pub fn run(&self) -> SimResult<DinnerReport> {
        let seats = self.config.seats;
        let mut meals = vec![0u32; seats];

        // Nobody is seated if the header cannot be shown.
        let mut failures = match self.observer.on_dinner_start(seats) {
            Ok(()) => {
                info!(seats, cycles = self.config.cycles, seed = self.config.seed, "dinner starts");
                self.seat_and_join(&mut meals)
            }
            Err(source) => vec![SimError::Observer(source)],
        };

        for source in self.forks.teardown() {
            failures.push(SimError::Teardown(source));
        }
        if let Err(source) = self.observer.on_dinner_end() {
            failures.push(SimError::Observer(source));
        }

        if failures.is_empty() {
            let report = DinnerReport { seats, cycles: self.config.cycles, meals };
            info!(seats, meals = report.total_meals(), "dinner finished");
            Ok(report)
        } else {
            warn!(failures = failures.len(), "dinner failed");
            Err(SimError::Dinner { failures })
        }
    }

    /// Spawn one scoped thread per seat and join them all.  Returns every
    /// spawn, philosopher, and panic failure.
    fn seat_and_join(&self, meals: &mut [u32]) -> Vec<SimError> {
        let mut failures = Vec::new();

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.config.seats);

            for i in 0..self.config.seats {
                let id = PhilosopherId(i as u32);
                let philosopher = Philosopher::new(
                    Seat::new(id, self.config.seats),
                    self.config.cycles,
                    self.config.max_dawdle_ms,
                    PhilosopherRng::new(self.config.seed, id),
                    &self.forks,
                    &self.board,
                    &self.observer,
                );
                let forks = &self.forks;

                let spawned = thread::Builder::new()
                    .name(format!("philosopher-{}", id.label()))
                    .spawn_scoped(scope, move || {
                        let guard = AbortOnDrop::new(forks);
                        let result = philosopher.dine();
                        if result.is_ok() {
                            guard.disarm();
                        }
                        result
                    });

                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(source) => failures.push(self.seat_failed(id, source)),
                }
            }

            for (id, handle) in handles {
                match handle.join() {
                    Ok(Ok(eaten)) => meals[id.index()] = eaten,
                    Ok(Err(e)) => failures.push(e),
                    Err(payload) => failures.push(SimError::Panicked {
                        philosopher: id,
                        message:     panic_message(payload.as_ref()),
                    }),
                }
                debug!(philosopher = %id, "joined");
            }
        });

        failures
    }

    /// A seat whose thread could not be spawned.  Stops everyone already
    /// seated instead of letting them dine to the end first.
    pub(crate) fn seat_failed(&self, philosopher: PhilosopherId, source: io::Error) -> SimError {
        warn!(%philosopher, error = %source, "cannot seat philosopher; aborting the table");
        self.forks.abort();
        SimError::Spawn { philosopher, source }
    }
}

/// Aborts the fork set when dropped armed: on an error return or while
/// unwinding from a panic.  Neighbours waiting on our forks then wake up.
struct AbortOnDrop<'a> {
    forks: &'a ForkSet,
    armed: bool,
}

impl<'a> AbortOnDrop<'a> {
    fn new(forks: &'a ForkSet) -> Self {
        Self { forks, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.forks.abort();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
