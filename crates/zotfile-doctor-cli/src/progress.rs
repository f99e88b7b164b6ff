use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use zotfile_doctor_core::ProgressReporter;

/// CLI progress reporter using indicatif spinners on stderr.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_db_read_start(&self) {
        self.start_spinner("Reading attachments from database...");
    }

    fn on_db_read_complete(&self, paths: usize, skipped: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Database: {} attachments ({} rows skipped) in {:.2}s",
            paths, skipped, duration_secs
        );
    }

    fn on_walk_start(&self) {
        self.start_spinner("Scanning zotfile directory...");
    }

    fn on_walk_progress(&self, files_found: usize, _current_path: &str) {
        let guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("Scanning... {} documents found", files_found));
        }
    }

    fn on_walk_complete(&self, paths: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Directory: {} documents in {:.2}s",
            paths, duration_secs
        );
    }

    fn on_cleanup_start(&self, _files: usize) {
        self.start_spinner("Removing files...");
    }

    fn on_cleanup_complete(&self, _removed_files: usize, _removed_dirs: usize) {
        self.finish_bar();
    }
}
