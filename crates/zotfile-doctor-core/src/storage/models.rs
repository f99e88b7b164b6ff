/// Zotero `itemAttachments.linkMode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    ImportedFile,
    ImportedUrl,
    LinkedFile,
    LinkedUrl,
    EmbeddedImage,
    Unknown(i64),
}

impl LinkMode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => LinkMode::ImportedFile,
            1 => LinkMode::ImportedUrl,
            2 => LinkMode::LinkedFile,
            3 => LinkMode::LinkedUrl,
            4 => LinkMode::EmbeddedImage,
            other => LinkMode::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            LinkMode::ImportedFile => 0,
            LinkMode::ImportedUrl => 1,
            LinkMode::LinkedFile => 2,
            LinkMode::LinkedUrl => 3,
            LinkMode::EmbeddedImage => 4,
            LinkMode::Unknown(code) => code,
        }
    }
}

/// A column value that could not be read as the type Zotero stores there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDefect {
    Null(&'static str),
    WrongType { column: &'static str, found: String },
    NotUtf8(&'static str),
}

/// One row of `itemAttachments`. Unreadable columns are left empty and the
/// first problem is kept in `defect`.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub row_id: i64,
    pub path: Option<String>,
    pub link_mode: Option<LinkMode>,
    pub content_type: Option<String>,
    pub defect: Option<ColumnDefect>,
}
