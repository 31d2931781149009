//! `dine-output` — the status table printed while the philosophers dine.
//!
//! ```text
//! |==========|==========|      header: printed once, before anyone sits
//! |    A     |    B     |
//! |==========|==========|
//! | -1       | -- Think |      one line per board change
//! ```
//!
//! [`format`] builds the text; [`StatusRenderer`] owns the print lock and
//! implements `dine_sim::DinnerObserver`, so every philosopher's render is
//! emitted as one uninterrupted line.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dine_output::StatusRenderer;
//!
//! let dinner = DinnerBuilder::new(config, StatusRenderer::stdout()).build()?;
//! dinner.run()?;
//! ```

pub mod error;
pub mod format;
pub mod renderer;


pub use error::{OutputError, OutputResult};
pub use renderer::StatusRenderer;
