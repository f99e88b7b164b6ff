#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a minimal Zotero database holding only `itemAttachments`.
pub fn create_zotero_db(dir: &Path, rows: &[(i64, Option<&str>, Option<&str>)]) -> PathBuf {
    let db_path = dir.join("zotero.sqlite");
    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE itemAttachments (
             itemID INTEGER PRIMARY KEY,
             parentItemID INT,
             linkMode INT,
             contentType TEXT,
             charsetID INT,
             path TEXT
         );",
    )
    .unwrap();
    for (link_mode, content_type, path) in rows {
        conn.execute(
            "INSERT INTO itemAttachments (linkMode, contentType, path) VALUES (?1, ?2, ?3)",
            params![link_mode, content_type, path],
        )
        .unwrap();
    }
    db_path
}

/// Create a file (and its parent directories) under `root`.
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"%PDF-1.4").unwrap();
}

pub const PDF: Option<&str> = Some("application/pdf");
pub const DJVU: Option<&str> = Some("application/djvu");
