use crate::config::AppConfig;
use crate::error::Error;
use crate::normalize::PathNormalizer;
use crate::path_set::PathSet;
use crate::progress::ProgressReporter;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

const PROGRESS_EVERY: usize = 100;

/// Recursively collect every supported document under `root` as a set of
/// normalized paths relative to `root`.
///
/// Any error while walking is fatal. Symlinks are not followed; a symlink to
/// a file is listed like the file itself.
pub fn build_dir_set(
    root: &Path,
    normalizer: &PathNormalizer,
    config: &AppConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PathSet, Error> {
    let mut set = PathSet::new();
    let mut files_found = 0usize;

    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() || (entry.path_is_symlink() && path.is_dir()) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !config.has_supported_extension(&file_name) {
            continue;
        }

        let relative = path.strip_prefix(root).map_err(|_| {
            Error::Other(format!(
                "{} is not under {}",
                path.display(),
                root.display()
            ))
        })?;

        let Some(relative_str) = relative.to_str() else {
            warn!("Skipping non UTF-8 path {}", path.display());
            continue;
        };

        let key = normalizer.normalize(relative_str);
        if !set.insert(key.clone(), relative) {
            debug!("{} collides with an earlier file as {}", relative_str, key);
        }

        files_found += 1;
        if files_found % PROGRESS_EVERY == 0 {
            reporter.on_walk_progress(files_found, relative_str);
        }
    }

    Ok(set)
}
