use crate::analysis::reconcile::Discrepancies;
use crate::error::Error;
use crate::path_set::PathSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupSummary {
    pub removed_files: usize,
    pub removed_dirs: usize,
}

/// Delete every file the database does not know about, then prune empty
/// directories below `root`.
///
/// Stops at the first failed deletion; files already removed stay removed.
/// `dir_set` must be the set the discrepancies were computed from, so each
/// key maps back to its on-disk spelling.
pub fn remove_untracked(
    root: &Path,
    discrepancies: &Discrepancies,
    dir_set: &PathSet,
) -> Result<CleanupSummary, Error> {
    let mut removed_files = 0usize;

    for key in &discrepancies.in_dir_not_db {
        let relative = dir_set.origin(key).ok_or_else(|| {
            Error::Other(format!("{} was not found by the directory walk", key))
        })?;
        let path = root.join(relative);
        fs::remove_file(&path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error removing {}: {}", path.display(), err),
            )
        })?;
        debug!("Removed {}", path.display());
        removed_files += 1;
    }

    let removed_dirs = prune_empty_dirs(root);
    info!(
        "Cleanup removed {} files and {} empty directories",
        removed_files, removed_dirs
    );

    Ok(CleanupSummary {
        removed_files,
        removed_dirs,
    })
}

/// Remove empty directories below `root`, deepest first. `root` itself is
/// kept. Directories that cannot be removed are left in place.
pub fn prune_empty_dirs(root: &Path) -> usize {
    let mut removed = 0usize;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
    {
        match fs::remove_dir(entry.path()) {
            Ok(()) => {
                debug!("Removed empty directory {}", entry.path().display());
                removed += 1;
            }
            Err(err) => debug!("Keeping {}: {}", entry.path().display(), err),
        }
    }

    removed
}
