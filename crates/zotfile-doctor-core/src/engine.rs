use crate::analysis::{self, CleanupSummary, Discrepancies};
use crate::config::AppConfig;
use crate::error::Error;
use crate::normalize::PathNormalizer;
use crate::path_set::PathSet;
use crate::platform::{self, CaseSensitivity};
use crate::progress::ProgressReporter;
use crate::scanner;
use crate::storage::{self, ManagedRoot, ZoteroDatabase};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct DoctorEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct DoctorResult {
    pub case_sensitivity: CaseSensitivity,
    pub discrepancies: Discrepancies,
    /// Directory side, kept so cleanup can map keys back to on-disk names.
    pub dir_set: PathSet,
    pub db_skipped: usize,
    pub db_read_duration: Duration,
    pub walk_duration: Duration,
}

impl DoctorEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Probe the managed directory's filesystem once, then reconcile.
    pub fn run(
        &self,
        db_path: &Path,
        managed_dir: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<DoctorResult, Error> {
        ensure_directory(managed_dir)?;
        let case = platform::probe_case_sensitivity(managed_dir)?;
        info!("Filesystem at {} is {:?}", managed_dir.display(), case);
        self.run_with(db_path, managed_dir, PathNormalizer::new(case), reporter)
    }

    /// Reconcile using a caller-supplied normalizer. Both sides of the
    /// comparison go through `normalizer`.
    pub fn run_with(
        &self,
        db_path: &Path,
        managed_dir: &Path,
        normalizer: PathNormalizer,
        reporter: &dyn ProgressReporter,
    ) -> Result<DoctorResult, Error> {
        ensure_directory(managed_dir)?;
        let root = ManagedRoot::new(managed_dir)?;

        // Phase 1: database
        reporter.on_db_read_start();
        let db_start = Instant::now();
        let extraction = {
            let db = ZoteroDatabase::open(db_path)?;
            storage::build_db_set(&db, &root, &normalizer, &self.config)?
        };
        let db_read_duration = db_start.elapsed();
        reporter.on_db_read_complete(
            extraction.paths.len(),
            extraction.skipped,
            db_read_duration.as_secs_f64(),
        );
        debug!(
            "Database read in {:.2}s: {} paths, {} rows skipped",
            db_read_duration.as_secs_f64(),
            extraction.paths.len(),
            extraction.skipped,
        );

        // Phase 2: directory walk
        reporter.on_walk_start();
        let walk_start = Instant::now();
        let dir_set = scanner::build_dir_set(managed_dir, &normalizer, &self.config, reporter)?;
        let walk_duration = walk_start.elapsed();
        reporter.on_walk_complete(dir_set.len(), walk_duration.as_secs_f64());
        debug!(
            "Walk completed in {:.2}s: {} documents",
            walk_duration.as_secs_f64(),
            dir_set.len(),
        );

        // Phase 3: compare
        let discrepancies = analysis::reconcile(&extraction.paths, &dir_set);

        Ok(DoctorResult {
            case_sensitivity: normalizer.case_sensitivity(),
            discrepancies,
            dir_set,
            db_skipped: extraction.skipped,
            db_read_duration,
            walk_duration,
        })
    }

    /// Delete the files found on disk but not in the database and prune the
    /// directories left empty.
    pub fn clean(
        &self,
        managed_dir: &Path,
        result: &DoctorResult,
        reporter: &dyn ProgressReporter,
    ) -> Result<CleanupSummary, Error> {
        reporter.on_cleanup_start(result.discrepancies.in_dir_not_db.len());
        let summary =
            analysis::remove_untracked(managed_dir, &result.discrepancies, &result.dir_set)?;
        reporter.on_cleanup_complete(summary.removed_files, summary.removed_dirs);
        Ok(summary)
    }
}

fn ensure_directory(dir: &Path) -> Result<(), Error> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidManagedDirectory(dir.to_path_buf()))
    }
}
