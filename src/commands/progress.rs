// src/commands/progress.rs
//! Terminal progress for batch conversion
//!
//! An overall bar counts processed cubes; a spinner line below it shows
//! the cube being worked on. Non-interactive and quiet runs fall back to
//! the library's log-based and silent trackers.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use segyconv::{LogProgress, ProgressTracker, SilentProgress};
use std::io::IsTerminal;
use std::time::Duration;

/// Progress bar for a batch of cubes
pub struct ConvertProgress {
    // Keeps both bars drawn as one group
    _multi: MultiProgress,
    overall: ProgressBar,
    status: ProgressBar,
}

impl ConvertProgress {
    /// Create a progress bar for `total_cubes` cubes
    pub fn new(total_cubes: u64, operation: &str) -> Self {
        let multi = MultiProgress::new();

        let overall = ProgressBar::new(total_cubes);
        overall.set_style(
            ProgressStyle::default_bar()
                .template("{msg} ({pos}/{len}) [{bar:40.green/dim}] {percent}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        overall.set_message(operation.to_string());

        let status = ProgressBar::new_spinner();
        status.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        status.enable_steady_tick(Duration::from_millis(100));

        let overall = multi.add(overall);
        let status = multi.add(status);

        Self {
            _multi: multi,
            overall,
            status,
        }
    }
}

impl ProgressTracker for ConvertProgress {
    fn set_message(&self, message: &str) {
        self.status.set_message(message.to_string());
    }

    fn increment(&self, amount: u64) {
        self.overall.inc(amount);
    }

    fn position(&self) -> u64 {
        self.overall.position()
    }

    fn length(&self) -> u64 {
        self.overall.length().unwrap_or(0)
    }

    fn finish_with_message(&self, message: &str) {
        self.status.finish_and_clear();
        self.overall.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.status.finish_and_clear();
        self.overall.abandon_with_message(message.to_string());
    }

    fn is_finished(&self) -> bool {
        self.overall.is_finished()
    }
}

/// Pick a tracker suited to the output: bar on a terminal, log lines
/// otherwise, nothing when quiet
pub fn tracker_for(total_cubes: u64, quiet: bool) -> Box<dyn ProgressTracker> {
    if quiet {
        Box::new(SilentProgress::with_length(total_cubes))
    } else if std::io::stderr().is_terminal() {
        Box::new(ConvertProgress::new(total_cubes, "Converting"))
    } else {
        Box::new(LogProgress::new("convert", total_cubes))
    }
}
