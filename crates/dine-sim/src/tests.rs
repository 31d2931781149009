//! Integration tests for dine-sim.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, mpsc};
use std::thread;
use std::time::Duration;

use dine_core::{Activity, DineError, DinnerConfig, ForkId, PhilosopherId};
use dine_table::{ForkError, Snapshot, StatusBoard};

use crate::philosopher::TRANSITIONS_PER_CYCLE;
use crate::{DinnerBuilder, DinnerObserver, DinnerReport, NoopObserver, ObserverResult, SimError, SimResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(seats: usize, cycles: u32) -> DinnerConfig {
    DinnerConfig {
        seats,
        cycles,
        seed:          42,
        max_dawdle_ms: 2,
    }
}

/// Records a snapshot per transition, serialised like a print lock.
#[derive(Default)]
struct Recorder {
    snapshots: Mutex<Vec<Snapshot>>,
    started:   AtomicUsize,
    ended:     AtomicUsize,
}

impl Recorder {
    fn take(&self) -> Vec<Snapshot> {
        std::mem::take(&mut *self.snapshots.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DinnerObserver for Recorder {
    fn on_dinner_start(&self, _seats: usize) -> ObserverResult {
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_transition(&self, board: &StatusBoard) -> ObserverResult {
        let mut log = self.snapshots.lock().unwrap_or_else(PoisonError::into_inner);
        log.push(board.snapshot());
        Ok(())
    }

    fn on_dinner_end(&self) -> ObserverResult {
        self.ended.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Run on a helper thread and fail the test instead of hanging on deadlock.
fn run_within<O>(config: DinnerConfig, observer: O, limit: Duration) -> SimResult<DinnerReport>
where
    O: DinnerObserver + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = DinnerBuilder::new(config, observer).build().and_then(|d| d.run());
        let _ = tx.send(result);
    });
    rx.recv_timeout(limit).expect("dinner did not finish: deadlock?")
}

// ── DinnerBuilder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_a_laid_table() {
        let dinner = DinnerBuilder::new(test_config(5, 1), NoopObserver).build().unwrap();
        assert_eq!(dinner.forks.len(), 5);
        assert_eq!(dinner.board.seats(), 5);
        assert!(dinner.board.snapshot().holders.iter().all(Option::is_none));
    }

    #[test]
    fn one_seat_is_a_configuration_error() {
        let err = DinnerBuilder::new(test_config(1, 1), NoopObserver).build().err().unwrap();
        assert!(matches!(err, SimError::Config(DineError::TooFewPhilosophers(1))));
    }

    #[test]
    fn overrides_replace_config_fields() {
        let dinner = DinnerBuilder::new(test_config(3, 1), NoopObserver)
            .cycles(4)
            .seed(9)
            .max_dawdle_ms(0)
            .build()
            .unwrap();
        assert_eq!(dinner.config.cycles, 4);
        assert_eq!(dinner.config.seed, 9);
        assert_eq!(dinner.config.max_dawdle_ms, 0);
    }
}

// ── Successful runs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn five_philosophers_one_cycle() {
        let recorder = Arc::new(Recorder::default());
        let report = run_within(test_config(5, 1), Arc::clone(&recorder), Duration::from_secs(20)).unwrap();

        assert_eq!(report.meals, vec![1; 5]);
        assert_eq!(report.total_meals(), 5);
        assert_eq!(recorder.started.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.ended.load(Ordering::SeqCst), 1);

        let snapshots = recorder.take();
        assert_eq!(snapshots.len() as u64, 5 * TRANSITIONS_PER_CYCLE);
        for snap in &snapshots {
            assert!(snap.violations().is_empty(), "{:?}", snap.violations());
        }

        let last = snapshots.last().unwrap();
        assert_eq!(last.activities, vec![Activity::Transitioning; 5]);
        assert!(last.holders.iter().all(Option::is_none));
    }

    #[test]
    fn zero_cycles_finishes_without_transitions() {
        let recorder = Arc::new(Recorder::default());
        let report = run_within(test_config(4, 0), Arc::clone(&recorder), Duration::from_secs(5)).unwrap();
        assert_eq!(report.meals, vec![0; 4]);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn two_philosophers_never_deadlock() {
        let config = test_config(2, 200).with_max_dawdle_ms(0);
        let report = run_within(config, NoopObserver, Duration::from_secs(30)).unwrap();
        assert_eq!(report.meals, vec![200, 200]);
    }

    #[test]
    fn every_table_size_terminates_with_consistent_snapshots() {
        for seats in 2..=9 {
            let recorder = Arc::new(Recorder::default());
            let config = test_config(seats, 10).with_max_dawdle_ms(1).with_seed(seats as u64);
            let report = run_within(config, Arc::clone(&recorder), Duration::from_secs(30)).unwrap();
            assert!(report.meals.iter().all(|&m| m == 10), "seats={seats}");

            let snapshots = recorder.take();
            assert_eq!(snapshots.len() as u64, seats as u64 * 10 * TRANSITIONS_PER_CYCLE);
            for snap in &snapshots {
                assert!(snap.violations().is_empty(), "seats={seats}: {:?}", snap.violations());
            }
        }
    }

    #[test]
    fn eaters_always_hold_both_forks() {
        let recorder = Arc::new(Recorder::default());
        run_within(test_config(6, 5), Arc::clone(&recorder), Duration::from_secs(30)).unwrap();

        let snapshots = recorder.take();
        let mut saw_eating = false;
        for snap in &snapshots {
            for i in 0..6u32 {
                let who = PhilosopherId(i);
                if snap.is_eating(who) {
                    saw_eating = true;
                    let held: Vec<ForkId> = snap.forks_held_by(who).collect();
                    assert_eq!(held.len(), 2);
                }
            }
        }
        assert!(saw_eating);
    }

    #[test]
    fn non_adjacent_philosophers_eat_at_the_same_time() {
        let recorder = Arc::new(Recorder::default());
        let config = test_config(6, 20).with_max_dawdle_ms(5);
        run_within(config, Arc::clone(&recorder), Duration::from_secs(30)).unwrap();

        let most = recorder
            .take()
            .iter()
            .map(|snap| snap.activities.iter().filter(|a| **a == Activity::Eating).count())
            .max()
            .unwrap_or(0);
        assert!(most >= 2, "at most {most} philosopher(s) ever ate at once");
    }
}

// ── Failure paths ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("sink closed")
        }
    }

    impl std::error::Error for Broken {}

    /// Fails the `n`th transition, then keeps working.
    struct FailOnce {
        n:     usize,
        calls: AtomicUsize,
    }

    impl DinnerObserver for FailOnce {
        fn on_transition(&self, _board: &StatusBoard) -> ObserverResult {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.n {
                return Err(Broken.into());
            }
            Ok(())
        }
    }

    /// Panics on philosopher A's first transition.
    struct PanicOnA;

    impl DinnerObserver for PanicOnA {
        fn on_transition(&self, _board: &StatusBoard) -> ObserverResult {
            if thread::current().name() == Some("philosopher-A") {
                panic!("boom");
            }
            Ok(())
        }
    }

    struct FailAt {
        start: bool,
    }

    impl DinnerObserver for FailAt {
        fn on_dinner_start(&self, _seats: usize) -> ObserverResult {
            if self.start { Err(Broken.into()) } else { Ok(()) }
        }

        fn on_dinner_end(&self) -> ObserverResult {
            if self.start { Ok(()) } else { Err(Broken.into()) }
        }
    }

    #[test]
    fn render_failure_stops_the_whole_table() {
        let observer = FailOnce { n: 3, calls: AtomicUsize::new(0) };
        let config = test_config(5, 50).with_max_dawdle_ms(1);
        let err = run_within(config, observer, Duration::from_secs(30)).unwrap_err();

        let failures = err.failures();
        let renders = failures.iter().filter(|f| matches!(f, SimError::Render { .. })).count();
        assert_eq!(renders, 1);
        assert!(failures.iter().any(|f| f.to_string().contains("sink closed")));
    }

    #[test]
    fn panicking_philosopher_is_reported_and_table_torn_down() {
        let err = run_within(test_config(5, 3), PanicOnA, Duration::from_secs(30)).unwrap_err();
        let failures = err.failures();

        assert!(failures.iter().any(|f| matches!(
            f,
            SimError::Panicked { philosopher, message }
                if *philosopher == PhilosopherId(0) && message == "boom"
        )));

        // A died right after picking up its first fork (fork 1).
        assert!(failures.iter().any(|f| matches!(
            f,
            SimError::Teardown(ForkError::HeldAtTeardown { fork, holder })
                if *fork == ForkId(1) && *holder == PhilosopherId(0)
        )));

        // Everybody else either finished or was stopped by the abort.
        assert!(failures.iter().all(|f| {
            matches!(f, SimError::Panicked { .. } | SimError::Teardown(_)) || f.is_abort()
        }));
    }

    #[test]
    fn start_failure_spawns_nobody() {
        let dinner = DinnerBuilder::new(test_config(3, 1), FailAt { start: true }).build().unwrap();
        let err = dinner.run().unwrap_err();
        let failures = err.failures();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], SimError::Observer(_)));
        assert!(dinner.board.snapshot().activities.iter().all(|a| *a == Activity::Transitioning));

        // The forks were still torn down.
        assert_eq!(
            dinner.forks.acquire(ForkId(0), PhilosopherId(0)),
            Err(ForkError::Retired(ForkId(0)))
        );
    }

    #[test]
    fn spawn_failure_aborts_the_seated_philosophers() {
        let dinner = DinnerBuilder::new(test_config(4, 1), NoopObserver).build().unwrap();
        let err = dinner.seat_failed(PhilosopherId(3), std::io::Error::other("no threads left"));

        assert!(matches!(err, SimError::Spawn { philosopher, .. } if philosopher == PhilosopherId(3)));
        assert!(err.to_string().contains("no threads left"));
        assert!(dinner.forks.is_aborted());
        assert_eq!(
            dinner.forks.acquire(ForkId(0), PhilosopherId(0)),
            Err(ForkError::Aborted(ForkId(0)))
        );
    }

    #[test]
    fn end_failure_is_reported_once() {
        let config = test_config(3, 1).with_max_dawdle_ms(0);
        let err = run_within(config, FailAt { start: false }, Duration::from_secs(10)).unwrap_err();
        assert_eq!(err.to_string(), "dinner failed with 1 error(s)");
        assert_eq!(err.failures().len(), 1);
        assert!(matches!(err.failures()[0], SimError::Observer(_)));
    }

    #[test]
    fn failures_flatten_nested_dinners() {
        let inner = SimError::Dinner {
            failures: vec![SimError::Teardown(ForkError::Poisoned(ForkId(1)))],
        };
        let outer = SimError::Dinner {
            failures: vec![inner, SimError::Config(DineError::TooFewPhilosophers(1))],
        };
        let flat = outer.failures();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].to_string(), "teardown: fork 1: lock poisoned by a panicking holder");
    }
}
