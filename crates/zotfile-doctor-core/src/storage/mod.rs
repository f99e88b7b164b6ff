pub mod attachments;
pub mod models;
pub mod queries;
pub mod sqlite;

pub use attachments::{build_db_set, DbExtraction, LinkFilter, ManagedRoot, SkipReason};
pub use sqlite::ZoteroDatabase;
