use super::models::{AttachmentRecord, ColumnDefect, LinkMode};
use super::sqlite::ZoteroDatabase;
use crate::config::AppConfig;
use crate::error::Error;
use crate::normalize::{NormalizedPath, PathNormalizer};
use crate::path_set::PathSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Which attachment rows are candidates for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFilter {
    /// `linkMode = 2 OR (linkMode = 3 AND contentType IN types)`: linked
    /// files of any content type pass.
    Legacy,
    /// `(linkMode = 2 OR linkMode = 3) AND contentType IN types`.
    Strict,
}

impl LinkFilter {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.strict_link_filter {
            LinkFilter::Strict
        } else {
            LinkFilter::Legacy
        }
    }

    pub fn accepts(self, record: &AttachmentRecord, config: &AppConfig) -> bool {
        let document = record
            .content_type
            .as_deref()
            .is_some_and(|t| config.is_supported_content_type(t));
        let Some(mode) = record.link_mode else {
            return false;
        };
        match self {
            LinkFilter::Legacy => {
                mode == LinkMode::LinkedFile || (mode == LinkMode::LinkedUrl && document)
            }
            LinkFilter::Strict => {
                matches!(mode, LinkMode::LinkedFile | LinkMode::LinkedUrl) && document
            }
        }
    }
}

/// Why a record was left out of the database set. None of these are errors:
/// the record is simply not something the managed directory can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A column is NULL where a value is required, or holds the wrong type.
    Malformed(ColumnDefect),
    /// A text column holds bytes that are not UTF-8.
    NotUtf8(&'static str),
    FilteredOut { link_mode: Option<i64>, content_type: Option<String> },
    MissingPath,
    UnsupportedExtension,
    NotAbsolute,
    OutsideManagedDirectory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed(ColumnDefect::Null(column)) => write!(f, "{} is NULL", column),
            SkipReason::Malformed(ColumnDefect::WrongType { column, found }) => {
                write!(f, "{} holds {} instead of the expected type", column, found)
            }
            SkipReason::Malformed(ColumnDefect::NotUtf8(column)) | SkipReason::NotUtf8(column) => {
                write!(f, "{} is not valid UTF-8", column)
            }
            SkipReason::FilteredOut {
                link_mode,
                content_type,
            } => write!(
                f,
                "filtered out (linkMode {}, contentType {})",
                link_mode.map_or_else(|| "NULL".to_string(), |m| m.to_string()),
                content_type.as_deref().unwrap_or("NULL")
            ),
            SkipReason::MissingPath => f.write_str("no path"),
            SkipReason::UnsupportedExtension => f.write_str("unsupported extension"),
            SkipReason::NotAbsolute => f.write_str("neither marked relative nor absolute"),
            SkipReason::OutsideManagedDirectory => f.write_str("outside the managed directory"),
        }
    }
}

/// The managed directory in the two spellings an absolute database path may
/// use: as given (made absolute) and with symlinks resolved.
#[derive(Debug, Clone)]
pub struct ManagedRoot {
    given: String,
    canonical: Option<String>,
}

impl ManagedRoot {
    pub fn new(dir: &Path) -> io::Result<Self> {
        let given = std::path::absolute(dir)?.to_string_lossy().into_owned();
        let canonical = fs::canonicalize(dir)
            .ok()
            .and_then(|p| p.to_str().map(str::to_owned))
            .filter(|c| *c != given);
        Ok(ManagedRoot { given, canonical })
    }

    /// Express an absolute path as a key relative to the root, if it lies
    /// under either spelling of the root.
    pub fn relativize(&self, absolute: &str, normalizer: &PathNormalizer) -> Option<NormalizedPath> {
        let target = normalizer.normalize(absolute);
        std::iter::once(&self.given)
            .chain(self.canonical.as_ref())
            .find_map(|root| {
                let root = normalizer.normalize(root);
                let prefix = root.as_str().trim_end_matches('/');
                target
                    .as_str()
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| normalizer.normalize(rest))
            })
    }
}

/// Reduce one attachment record to its managed-directory key, or say why it
/// does not have one.
pub fn classify(
    record: &AttachmentRecord,
    config: &AppConfig,
    filter: LinkFilter,
    root: &ManagedRoot,
    normalizer: &PathNormalizer,
) -> Result<NormalizedPath, SkipReason> {
    match &record.defect {
        Some(ColumnDefect::NotUtf8(column)) => return Err(SkipReason::NotUtf8(*column)),
        Some(defect) => return Err(SkipReason::Malformed(defect.clone())),
        None => {}
    }

    if !filter.accepts(record, config) {
        return Err(SkipReason::FilteredOut {
            link_mode: record.link_mode.map(LinkMode::code),
            content_type: record.content_type.clone(),
        });
    }

    let raw = record.path.as_deref().ok_or(SkipReason::MissingPath)?;
    if !config.has_supported_extension(raw) {
        return Err(SkipReason::UnsupportedExtension);
    }

    let prefix = config.relative_prefix.as_str();
    let key = if !prefix.is_empty() && raw.contains(prefix) {
        normalizer.normalize(&raw.replace(prefix, ""))
    } else if Path::new(raw).is_absolute() {
        root.relativize(raw, normalizer)
            .ok_or(SkipReason::OutsideManagedDirectory)?
    } else {
        return Err(SkipReason::NotAbsolute);
    };

    if key.escapes_root() || matches!(key.as_str(), "" | ".") {
        return Err(SkipReason::OutsideManagedDirectory);
    }
    Ok(key)
}

/// The database side of a reconciliation.
#[derive(Debug)]
pub struct DbExtraction {
    pub paths: PathSet,
    pub skipped: usize,
}

/// Read every attachment and keep the ones that resolve to a document inside
/// the managed directory. Unclassifiable rows are skipped; database failures
/// propagate.
pub fn build_db_set(
    db: &ZoteroDatabase,
    root: &ManagedRoot,
    normalizer: &PathNormalizer,
    config: &AppConfig,
) -> Result<DbExtraction, Error> {
    let filter = LinkFilter::from_config(config);
    let mut paths = PathSet::new();
    let mut skipped = 0usize;

    for record in db.attachment_records()? {
        match classify(&record, config, filter, root, normalizer) {
            Ok(key) => {
                let origin = key.as_str().to_owned();
                paths.insert(key, origin);
            }
            Err(reason) => {
                debug!(
                    "Skipping attachment {} ({}): {}",
                    record.row_id,
                    record.path.as_deref().unwrap_or(""),
                    reason
                );
                skipped += 1;
            }
        }
    }

    Ok(DbExtraction { paths, skipped })
}
