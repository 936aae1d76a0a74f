//! Spinner shown while a go command runs
//!
//! `go list -u -m -json all` queries the module proxy for every dependency
//! and can take a while. The spinner goes to stderr so stdout stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Feedback while waiting for the go toolchain
pub struct Progress {
    enabled: bool,
    /// Spinner of the command currently running
    waiting: Option<ProgressBar>,
}

impl Progress {
    /// Spinner on stderr, only when stderr is a terminal
    pub fn for_stderr() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
            waiting: None,
        }
    }

    /// No feedback at all
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            waiting: None,
        }
    }

    /// Start waiting for `command`
    pub fn wait_for(&mut self, command: &str) {
        self.done();
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(format!("{}, be patient...", command));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.waiting = Some(spinner);
    }

    /// The command finished, clear its spinner
    pub fn done(&mut self) {
        if let Some(spinner) = self.waiting.take() {
            spinner.finish_and_clear();
        }
    }

    /// Returns true while a spinner is shown
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.done();
    }
}
