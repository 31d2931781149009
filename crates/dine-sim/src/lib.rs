//! `dine-sim` — runs the dinner.
//!
//! # One thread per philosopher
//!
//! ```text
//! DinnerBuilder::build   validate config, create ForkSet + StatusBoard
//! Dinner::run
//!   observer.on_dinner_start          (header)
//!   thread::scope
//!     spawn philosopher 0..N          each borrows &ForkSet, &StatusBoard, &O
//!       repeat cycles: eat, think     every board write → observer.on_transition
//!     join all                        collect meals, errors, panics
//!   ForkSet::teardown                 every fork, failures aggregated
//!   observer.on_dinner_end            (print lock teardown)
//! ```
//!
//! A philosopher that fails (or panics) aborts the fork set on its way out,
//! so neighbours blocked on its forks wake up instead of waiting forever.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dine_core::DinnerConfig;
//! use dine_sim::{DinnerBuilder, NoopObserver};
//!
//! let report = DinnerBuilder::new(DinnerConfig::default(), NoopObserver)
//!     .build()?
//!     .run()?;
//! assert!(report.meals.iter().all(|&m| m == 1));
//! ```

pub mod builder;
pub mod dinner;
pub mod error;
pub mod observer;
pub mod philosopher;

#[cfg(test)]
mod tests;

pub use builder::DinnerBuilder;
pub use dinner::{Dinner, DinnerReport};
pub use error::{SimError, SimResult};
pub use observer::{DinnerObserver, NoopObserver, ObserverError, ObserverResult};
pub use philosopher::Philosopher;
