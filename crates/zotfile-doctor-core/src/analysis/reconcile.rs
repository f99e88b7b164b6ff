use crate::normalize::NormalizedPath;
use crate::path_set::PathSet;
use std::fmt;

const INDENT: &str = "   ";

/// Set differences between the database and the managed directory, each side
/// sorted by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancies {
    pub in_db_not_dir: Vec<NormalizedPath>,
    pub in_dir_not_db: Vec<NormalizedPath>,
    pub db_total: usize,
    pub dir_total: usize,
}

impl Discrepancies {
    pub fn is_consistent(&self) -> bool {
        self.in_db_not_dir.is_empty() && self.in_dir_not_db.is_empty()
    }
}

/// Plain set subtraction in both directions. No fuzzy matching.
pub fn reconcile(db_set: &PathSet, dir_set: &PathSet) -> Discrepancies {
    Discrepancies {
        in_db_not_dir: db_set.difference(dir_set),
        in_dir_not_db: dir_set.difference(db_set),
        db_total: db_set.len(),
        dir_total: dir_set.len(),
    }
}

impl fmt::Display for Discrepancies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "There were {}/{} files in DB but not in zotfile directory:",
            self.in_db_not_dir.len(),
            self.db_total
        )?;
        for path in &self.in_db_not_dir {
            writeln!(f, "{}{}", INDENT, path)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "There were {}/{} files in zotfile directory but not in DB:",
            self.in_dir_not_db.len(),
            self.dir_total
        )?;
        for path in &self.in_dir_not_db {
            writeln!(f, "{}{}", INDENT, path)?;
        }
        Ok(())
    }
}
