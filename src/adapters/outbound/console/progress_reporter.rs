use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// StderrProgressReporter adapter showing a spinner on stderr
///
/// Stdout carries the JSON report, so progress never goes there. A quiet
/// reporter uses a hidden bar and draws nothing.
pub struct StderrProgressReporter {
    spinner: ProgressBar,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    pub fn quiet() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for StderrProgressReporter {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("Checking outdated packages");
        reporter.report("Running security audit");
        reporter.finish();
    }

    #[test]
    fn test_quiet_reporter_draws_nothing() {
        let reporter = StderrProgressReporter::quiet();
        reporter.report("hidden");
        reporter.finish();
        assert!(reporter.spinner.is_hidden());
    }
}
