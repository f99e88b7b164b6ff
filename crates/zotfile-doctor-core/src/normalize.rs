use crate::platform::CaseSensitivity;
use std::fmt;
use std::path::is_separator;
use unicode_normalization::UnicodeNormalization;

/// Comparable key for a relative attachment path. Two spellings of the same
/// file on the target filesystem map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the key climbs out of its root (`..` first segment) or is rooted.
    pub fn escapes_root(&self) -> bool {
        self.0 == ".." || self.0.starts_with("../") || self.0.starts_with('/')
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns raw path strings into [`NormalizedPath`] keys for one filesystem.
///
/// Built once per run from the probed [`CaseSensitivity`] and shared by the
/// database and directory extractors so both sides fold case identically.
#[derive(Debug, Clone, Copy)]
pub struct PathNormalizer {
    case: CaseSensitivity,
}

impl PathNormalizer {
    pub fn new(case: CaseSensitivity) -> Self {
        Self { case }
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    /// NFD, then lower-case on case-insensitive filesystems, then lexical
    /// path normalization.
    pub fn normalize(&self, raw: &str) -> NormalizedPath {
        let decomposed: String = raw.nfd().collect();
        let folded = match self.case {
            CaseSensitivity::Sensitive => decomposed,
            // Lower-casing can yield precomposed characters; decompose again.
            CaseSensitivity::Insensitive => decomposed.to_lowercase().nfd().collect(),
        };
        NormalizedPath(normalize_lexically(&folded))
    }
}

/// Collapse redundant separators and `.`/`..` segments without touching the
/// filesystem. Output always uses `/`. Empty input stays empty.
pub fn normalize_lexically(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let rooted = path.starts_with(is_separator);
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
