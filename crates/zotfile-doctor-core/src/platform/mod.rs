use std::io;
use std::path::Path;
use tracing::{debug, warn};

const PROBE_PREFIX: &str = "TmP";

/// Whether a filesystem treats names differing only by case as distinct files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    pub fn is_sensitive(self) -> bool {
        matches!(self, CaseSensitivity::Sensitive)
    }
}

/// Probe the filesystem holding `dir` by creating a mixed-case temp file and
/// checking whether its lower-cased name resolves too.
///
/// A `TmP*` file briefly appears in `dir` while probing; it is removed when
/// this returns, including on error. Falls back to the system temp directory
/// when `dir` is not writable.
pub fn probe_case_sensitivity(dir: &Path) -> io::Result<CaseSensitivity> {
    let probe = match tempfile::Builder::new()
        .prefix(PROBE_PREFIX)
        .tempfile_in(dir)
    {
        Ok(file) => file,
        Err(err) => {
            warn!(
                "Cannot create probe file in {}: {}; probing the system temp directory instead",
                dir.display(),
                err
            );
            tempfile::Builder::new().prefix(PROBE_PREFIX).tempfile()?
        }
    };

    let result = case_of(probe.path());
    drop(probe);
    result
}

fn case_of(probe_path: &Path) -> io::Result<CaseSensitivity> {
    let name = probe_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("probe file {} has no UTF-8 name", probe_path.display()),
            )
        })?;

    let folded = probe_path.with_file_name(name.to_lowercase());
    let case = if folded.try_exists()? {
        CaseSensitivity::Insensitive
    } else {
        CaseSensitivity::Sensitive
    };
    debug!("Probed {} via {}: {:?}", probe_path.display(), folded.display(), case);
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_probe_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        probe_case_sensitivity(dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_probe_is_stable() {
        let dir = tempdir().unwrap();
        let first = probe_case_sensitivity(dir.path()).unwrap();
        let second = probe_case_sensitivity(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_probe_falls_back_when_dir_is_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(probe_case_sensitivity(&missing).is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_tmp_is_case_sensitive() {
        let dir = tempdir().unwrap();
        assert_eq!(
            probe_case_sensitivity(dir.path()).unwrap(),
            CaseSensitivity::Sensitive
        );
    }

    #[test]
    fn test_case_of_detects_folding() {
        let dir = tempdir().unwrap();
        let upper = dir.path().join("TmPFolded");
        fs::write(&upper, b"").unwrap();
        // Simulate a case-insensitive filesystem by creating the folded twin.
        fs::write(dir.path().join("tmpfolded"), b"").unwrap();
        assert_eq!(case_of(&upper).unwrap(), CaseSensitivity::Insensitive);
    }
}
