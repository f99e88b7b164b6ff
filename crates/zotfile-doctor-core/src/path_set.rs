use crate::normalize::NormalizedPath;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Unordered set of normalized attachment paths.
///
/// Each key remembers the relative path it was first built from, so callers
/// that need to touch the file (cleanup) use the real on-disk spelling rather
/// than a case-folded key.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    entries: HashMap<NormalizedPath, PathBuf>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the key was already present; the first origin wins.
    pub fn insert(&mut self, key: NormalizedPath, origin: impl Into<PathBuf>) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(origin.into());
                true
            }
        }
    }

    pub fn contains(&self, key: &NormalizedPath) -> bool {
        self.entries.contains_key(key)
    }

    pub fn origin(&self, key: &NormalizedPath) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.entries.keys()
    }

    /// Keys in `self` but not in `other`, sorted.
    pub fn difference(&self, other: &PathSet) -> Vec<NormalizedPath> {
        let mut missing: Vec<NormalizedPath> = self
            .entries
            .keys()
            .filter(|key| !other.contains(key))
            .cloned()
            .collect();
        missing.sort();
        missing
    }

    /// Keys present in both sets, sorted.
    pub fn intersection(&self, other: &PathSet) -> Vec<NormalizedPath> {
        let mut shared: Vec<NormalizedPath> = self
            .entries
            .keys()
            .filter(|key| other.contains(key))
            .cloned()
            .collect();
        shared.sort();
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::PathNormalizer;
    use crate::platform::CaseSensitivity;

    #[test]
    fn test_first_origin_wins() {
        let normalizer = PathNormalizer::new(CaseSensitivity::Insensitive);
        let mut set = PathSet::new();
        assert!(set.insert(normalizer.normalize("Sub/Doc.PDF"), "Sub/Doc.PDF"));
        assert!(!set.insert(normalizer.normalize("sub/doc.pdf"), "sub/doc.pdf"));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.origin(&normalizer.normalize("SUB/DOC.pdf")),
            Some(Path::new("Sub/Doc.PDF"))
        );
    }
}
