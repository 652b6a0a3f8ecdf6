use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that tracks which pipeline stage is running.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }

    /// A silent reporter counts as finished.
    pub fn is_finished(&self) -> bool {
        self.progress_bar
            .as_ref()
            .map_or(true, |pb| pb.is_finished())
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if self.is_finished() {
            return;
        }
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}
