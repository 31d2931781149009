//! `StatusRenderer<W>` — the print lock, bridging `DinnerObserver` to a
//! `Write` sink.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use dine_sim::{DinnerObserver, ObserverResult};
use dine_table::StatusBoard;
use tracing::debug;

use crate::format;
use crate::{OutputError, OutputResult};

/// Renders the status board to `W`, one whole line at a time.
///
/// The sink lives inside the print lock.  A render holds the lock for
/// exactly one snapshot, format, and write; it never touches a fork, so a
/// philosopher waiting here can never be holding up fork contention.
pub struct StatusRenderer<W: Write + Send> {
    sink:  Mutex<W>,
    lines: AtomicU64,
}

impl StatusRenderer<io::Stdout> {
    /// Render to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> StatusRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink:  Mutex::new(sink),
            lines: AtomicU64::new(0),
        }
    }

    /// Write the three header lines.
    pub fn render_header(&self, seats: usize) -> OutputResult<()> {
        let mut sink = self.lock()?;
        sink.write_all(format::header(seats).as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Snapshot `board` and write one status line, all under the print lock.
    pub fn render(&self, board: &StatusBoard) -> OutputResult<()> {
        let mut sink = self.lock()?;
        let line = format::snapshot_line(&board.snapshot());
        sink.write_all(line.as_bytes())?;
        sink.flush()?;
        self.lines.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Tear down the print lock: flush the sink, recovering it if a renderer
    /// panicked, and report that panic.
    pub fn finish(&self) -> OutputResult<()> {
        match self.sink.lock() {
            Ok(mut sink) => {
                sink.flush()?;
                debug!(lines = self.lines_written(), "status output finished");
                Ok(())
            }
            Err(poisoned) => {
                let _ = poisoned.into_inner().flush();
                self.sink.clear_poison();
                Err(OutputError::PrintLockPoisoned)
            }
        }
    }

    /// Status lines written so far (header excluded).
    pub fn lines_written(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    /// Unwrap the sink, e.g. to inspect captured output in tests.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Poison the print lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _sink = self.sink.lock();
                    panic!("renderer died mid-line");
                })
                .join();
        });
    }

    fn lock(&self) -> OutputResult<std::sync::MutexGuard<'_, W>> {
        self.sink.lock().map_err(|_| OutputError::PrintLockPoisoned)
    }
}

impl<W: Write + Send> DinnerObserver for StatusRenderer<W> {
    fn on_dinner_start(&self, seats: usize) -> ObserverResult {
        Ok(self.render_header(seats)?)
    }

    fn on_transition(&self, board: &StatusBoard) -> ObserverResult {
        Ok(self.render(board)?)
    }

    fn on_dinner_end(&self) -> ObserverResult {
        Ok(self.finish()?)
    }
}
