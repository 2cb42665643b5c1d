use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinners shown while the dataset loads and while HTML is rendered
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    fn start(&mut self, message: String) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    fn finish(&mut self, message: String) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_with_message(message);
        }
    }

    pub fn start_loading(&mut self, path: &Path) {
        self.start(format!("Loading {}", path.display()));
    }

    pub fn finish_loading(&mut self, records: usize) {
        self.finish(format!("✓ Loaded {records} records"));
    }

    pub fn start_rendering(&mut self, kind: &str) {
        self.start(format!("Rendering {kind}"));
    }

    pub fn finish_rendering(&mut self, path: &Path) {
        self.finish(format!("✓ Wrote {}", path.display()));
    }

    /// Drop any running spinner without a message, e.g. after an error
    pub fn abandon(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_disabled() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start_loading(Path::new("data.csv"));
        assert!(!reporter.is_active());
        reporter.finish_loading(10);
    }

    #[test]
    fn test_loading_lifecycle() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_loading(Path::new("data.csv"));
        assert!(reporter.is_active());
        reporter.finish_loading(42);
        assert!(!reporter.is_active());
    }

    #[test]
    fn test_rendering_lifecycle() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_rendering("dashboard");
        assert!(reporter.is_active());
        reporter.finish_rendering(Path::new("esg_dashboard.html"));
        assert!(!reporter.is_active());
    }

    #[test]
    fn test_abandon_clears_spinner() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_rendering("report");
        reporter.abandon();
        assert!(!reporter.is_active());
        // Finishing with nothing running is a no-op
        reporter.finish_loading(0);
    }

    #[test]
    fn test_progress_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressReporter>();
    }
}
