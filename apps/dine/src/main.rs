//! dine — seat the philosophers, let them eat, print the table as it changes.
//!
//! ```text
//! dine [CYCLES] [-n PHILOSOPHERS] [--seed SEED] [--dawdle-ms MS] [-v]
//! ```
//!
//! Standard output carries the header and one status line per change.
//! Diagnostics and logs go to standard error.

use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use dine_core::DinnerConfig;
use dine_output::StatusRenderer;
use dine_sim::{DinnerBuilder, SimError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Dining philosophers with deadlock-free fork ordering
#[derive(Parser, Debug)]
#[command(name = "dine")]
#[command(about = "Dining philosophers with deadlock-free fork ordering", long_about = None)]
struct Args {
    /// Times each philosopher eats (and thinks)
    #[arg(value_name = "CYCLES", default_value_t = DinnerConfig::DEFAULT_CYCLES)]
    cycles: u32,

    /// Number of philosophers at the table
    #[arg(short = 'n', long, default_value_t = DinnerConfig::DEFAULT_SEATS)]
    philosophers: usize,

    /// Seed for think/eat intervals (default: from the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound of each think/eat interval, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DinnerConfig::DEFAULT_MAX_DAWDLE_MS)]
    dawdle_ms: u64,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = DinnerConfig {
        seats:         args.philosophers,
        cycles:        args.cycles,
        seed,
        max_dawdle_ms: args.dawdle_ms,
    };
    debug!(?config, "configuration");

    let dinner = DinnerBuilder::new(config, StatusRenderer::stdout())
        .build()
        .context("cannot lay the table")?;
    let report = dinner.run()?;

    info!(
        philosophers = report.seats,
        meals = report.total_meals(),
        lines = dinner.observer.lines_written(),
        "everybody has eaten"
    );
    Ok(())
}

/// One stderr line per failure.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<SimError>() {
        Some(sim) => {
            for failure in sim.failures() {
                eprintln!("dine: {failure}");
            }
        }
        None => eprintln!("dine: {err:#}"),
    }
}

/// Logs go to stderr so stdout stays a clean status table.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(seed_from_elapsed)
        .unwrap_or(0)
}

/// Folds whole seconds and the sub-second nanos into one seed.  Nanos fit in
/// 30 bits, so every bit of both parts survives until seconds pass 2^34.
fn seed_from_elapsed(elapsed: Duration) -> u64 {
    (elapsed.as_secs() << 30) ^ u64::from(elapsed.subsec_nanos())
}
