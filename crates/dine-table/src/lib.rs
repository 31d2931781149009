//! `dine-table` — the shared state every philosopher touches.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`forks`]   | `ForkSet` — N blocking, exclusively held forks in a ring |
//! | [`board`]   | `StatusBoard` (live) and `Snapshot` (copied for render)   |
//! | [`error`]   | `ForkError`, `ForkResult`                                 |
//!
//! The two halves are deliberately independent: the board never locks a
//! fork, so rendering it can never wait on fork contention.

pub mod board;
pub mod error;
pub mod forks;


pub use board::{Snapshot, StatusBoard};
pub use error::{ForkError, ForkResult};
pub use forks::ForkSet;
