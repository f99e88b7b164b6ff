/// Trait for reporting reconciliation progress.
///
/// The CLI implements it with indicatif spinners. All methods have default
/// no-op implementations.
pub trait ProgressReporter {
    fn on_db_read_start(&self) {}
    fn on_db_read_complete(&self, _paths: usize, _skipped: usize, _duration_secs: f64) {}
    fn on_walk_start(&self) {}
    fn on_walk_progress(&self, _files_found: usize, _current_path: &str) {}
    fn on_walk_complete(&self, _paths: usize, _duration_secs: f64) {}
    fn on_cleanup_start(&self, _files: usize) {}
    fn on_cleanup_complete(&self, _removed_files: usize, _removed_dirs: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
