//! `dine-core` — foundational types for the `rust_dine` simulation.
//!
//! This crate is a dependency of every other `dine-*` crate.  It has no
//! `dine-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PhilosopherId`, `ForkId`                             |
//! | [`seating`]     | `Seat` — left/right fork and acquisition order        |
//! | [`activity`]    | `Activity` (Thinking / Eating / Transitioning)        |
//! | [`rng`]         | `PhilosopherRng` (per-philosopher dawdle intervals)   |
//! | [`config`]      | `DinnerConfig`                                        |
//! | [`error`]       | `DineError`, `DineResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod activity;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod seating;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use activity::Activity;
pub use config::DinnerConfig;
pub use error::{DineError, DineResult};
pub use ids::{ForkId, PhilosopherId};
pub use rng::PhilosopherRng;
pub use seating::Seat;
