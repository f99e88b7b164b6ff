use super::models::{AttachmentRecord, ColumnDefect, LinkMode};
use super::sqlite::ZoteroDatabase;
use rusqlite::types::ValueRef;
use rusqlite::{Result, Row};
use std::str;
use tracing::debug;

impl ZoteroDatabase {
    /// Every attachment row. Filtering happens in the extractor so the
    /// link-mode rules stay testable without SQL. A row whose columns hold
    /// unexpected values is still returned, carrying a [`ColumnDefect`].
    pub fn attachment_records(&self) -> Result<Vec<AttachmentRecord>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT rowid, path, linkMode, contentType FROM itemAttachments")?;
        let records = stmt
            .query_map([], |row| {
                let mut defect = None;
                let path = text_column(row, 1, "path", &mut defect)?;
                let link_mode = link_mode_column(row, 2, &mut defect)?;
                let content_type = text_column(row, 3, "contentType", &mut defect)?;
                Ok(AttachmentRecord {
                    row_id: row.get(0)?,
                    path,
                    link_mode,
                    content_type,
                    defect,
                })
            })?
            .collect::<Result<Vec<_>>>()?;
        debug!("Read {} attachment rows", records.len());
        Ok(records)
    }
}

fn note(defect: &mut Option<ColumnDefect>, found: ColumnDefect) {
    if defect.is_none() {
        *defect = Some(found);
    }
}

fn text_column(
    row: &Row<'_>,
    idx: usize,
    column: &'static str,
    defect: &mut Option<ColumnDefect>,
) -> Result<Option<String>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        ValueRef::Text(bytes) => match str::from_utf8(bytes) {
            Ok(text) => Ok(Some(text.to_owned())),
            Err(_) => {
                note(defect, ColumnDefect::NotUtf8(column));
                Ok(None)
            }
        },
        other => {
            note(
                defect,
                ColumnDefect::WrongType {
                    column,
                    found: other.data_type().to_string(),
                },
            );
            Ok(None)
        }
    }
}

fn link_mode_column(
    row: &Row<'_>,
    idx: usize,
    defect: &mut Option<ColumnDefect>,
) -> Result<Option<LinkMode>> {
    match row.get_ref(idx)? {
        ValueRef::Integer(code) => Ok(Some(LinkMode::from_code(code))),
        ValueRef::Null => {
            note(defect, ColumnDefect::Null("linkMode"));
            Ok(None)
        }
        other => {
            note(
                defect,
                ColumnDefect::WrongType {
                    column: "linkMode",
                    found: other.data_type().to_string(),
                },
            );
            Ok(None)
        }
    }
}
