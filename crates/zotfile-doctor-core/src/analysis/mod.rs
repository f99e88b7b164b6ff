pub mod cleanup;
pub mod reconcile;

pub use cleanup::{prune_empty_dirs, remove_untracked, CleanupSummary};
pub use reconcile::{reconcile, Discrepancies};
