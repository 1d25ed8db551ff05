//! Progress reporting for grid runs
//!
//! The runner calls a [`ProgressReporter`] between batches of cells. The
//! numeric pipeline never sees it.

use std::time::Instant;
use tracing::info;

/// Receives progress notifications from a grid run
pub trait ProgressReporter {
    /// A run over `total` cells is starting
    fn start(&mut self, total: usize);

    /// `done` of `total` cells have been exported
    fn advance(&mut self, done: usize, total: usize);

    /// The run has finished
    fn finish(&mut self);
}

/// Discards all notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self, _done: usize, _total: usize) {}
    fn finish(&mut self) {}
}

/// Emits a `tracing` event every `step_percent` percent
#[derive(Debug, Clone)]
pub struct LogProgress {
    step_percent: usize,
    next_percent: usize,
    started: Option<Instant>,
}

impl LogProgress {
    /// Report every `step_percent` percent (at least 1)
    #[must_use]
    pub fn new(step_percent: usize) -> Self {
        Self {
            step_percent: step_percent.clamp(1, 100),
            next_percent: 0,
            started: None,
        }
    }

    /// Milliseconds since [`ProgressReporter::start`]
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.started
            .map_or(0.0, |t| t.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressReporter for LogProgress {
    fn start(&mut self, total: usize) {
        self.started = Some(Instant::now());
        self.next_percent = self.step_percent;
        info!(total, "STASH progress: starting");
    }

    fn advance(&mut self, done: usize, total: usize) {
        if total == 0 {
            return;
        }
        let percent = done * 100 / total;
        if percent >= self.next_percent {
            info!(done, total, percent, "STASH progress");
            self.next_percent = (percent / self.step_percent + 1) * self.step_percent;
        }
    }

    fn finish(&mut self) {
        info!(elapsed_ms = self.elapsed_ms(), "STASH progress: finished");
    }
}
