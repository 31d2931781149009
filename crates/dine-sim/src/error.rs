use dine_core::{DineError, PhilosopherId};
use dine_table::ForkError;
use thiserror::Error;

use crate::ObserverError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] DineError),

    #[error("{philosopher}: {source}")]
    Fork {
        philosopher: PhilosopherId,
        #[source]
        source:      ForkError,
    },

    #[error("{philosopher}: status output failed: {source}")]
    Render {
        philosopher: PhilosopherId,
        #[source]
        source:      ObserverError,
    },

    #[error("status output failed: {0}")]
    Observer(#[source] ObserverError),

    #[error("{philosopher}: could not start thread: {source}")]
    Spawn {
        philosopher: PhilosopherId,
        #[source]
        source:      std::io::Error,
    },

    #[error("{philosopher}: exited abnormally: {message}")]
    Panicked {
        philosopher: PhilosopherId,
        message:     String,
    },

    #[error("teardown: {0}")]
    Teardown(#[source] ForkError),

    #[error("dinner failed with {} error(s)", .failures.len())]
    Dinner { failures: Vec<SimError> },
}

impl SimError {
    /// Flatten into the individual failures, one per diagnostic line.
    pub fn failures(&self) -> Vec<&SimError> {
        match self {
            SimError::Dinner { failures } => failures.iter().flat_map(SimError::failures).collect(),
            other => vec![other],
        }
    }

    /// `true` for the secondary failure of a philosopher stopped by an abort.
    pub fn is_abort(&self) -> bool {
        matches!(self, SimError::Fork { source, .. } if source.is_abort())
    }
}

pub type SimResult<T> = Result<T, SimError>;
