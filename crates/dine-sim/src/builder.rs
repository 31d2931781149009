//! Fluent builder for constructing a [`Dinner`].

use dine_core::DinnerConfig;
use dine_table::{ForkSet, StatusBoard};
use tracing::debug;

use crate::{Dinner, DinnerObserver, SimResult};

/// Fluent builder for [`Dinner<O>`].
///
/// # Required inputs
///
/// - [`DinnerConfig`] — seats, cycles, seed, dawdle bound
/// - `O: DinnerObserver` — where status changes go (e.g. `dine_output::StatusRenderer`)
///
/// # Optional overrides
///
/// | Method             | Default               |
/// |--------------------|-----------------------|
/// | `.cycles(n)`       | `config.cycles`       |
/// | `.seed(s)`         | `config.seed`         |
/// | `.max_dawdle_ms(m)`| `config.max_dawdle_ms`|
///
/// # Example
///
/// ```rust,ignore
/// let dinner = DinnerBuilder::new(config, StatusRenderer::stdout())
///     .cycles(3)
///     .build()?;
/// let report = dinner.run()?;
/// ```
pub struct DinnerBuilder<O: DinnerObserver> {
    config:   DinnerConfig,
    observer: O,
}

impl<O: DinnerObserver> DinnerBuilder<O> {
    pub fn new(config: DinnerConfig, observer: O) -> Self {
        Self { config, observer }
    }

    pub fn cycles(mut self, cycles: u32) -> Self {
        self.config.cycles = cycles;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn max_dawdle_ms(mut self, max_dawdle_ms: u64) -> Self {
        self.config.max_dawdle_ms = max_dawdle_ms;
        self
    }

    /// Validate the configuration and lay the table: `seats` unheld forks,
    /// every philosopher transitioning.
    pub fn build(self) -> SimResult<Dinner<O>> {
        self.config.validate()?;
        let seats = self.config.seats;
        debug!(seats, cycles = self.config.cycles, "laying the table");

        Ok(Dinner {
            forks:    ForkSet::new(seats),
            board:    StatusBoard::new(seats),
            config:   self.config,
            observer: self.observer,
        })
    }
}
