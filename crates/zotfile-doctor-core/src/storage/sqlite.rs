use rusqlite::{Connection, OpenFlags, Result};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Read-only handle on a Zotero `zotero.sqlite`. The connection closes when
/// the handle is dropped.
pub struct ZoteroDatabase {
    conn: Connection,
}

impl ZoteroDatabase {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        // Zotero keeps its database locked while running.
        conn.busy_timeout(Duration::from_secs(5))?;
        debug!("Opened {} read-only", path.display());
        Ok(ZoteroDatabase { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
