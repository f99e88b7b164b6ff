use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

/// Reconciliation settings. Every field has a default, so an absent config
/// file and an empty environment yield the stock Zotero/ZotFile conventions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Document extensions (without the dot), matched case-insensitively.
    pub extensions: Vec<String>,
    /// MIME types considered documents by the link-mode filter.
    pub content_types: Vec<String>,
    /// Marker Zotero prepends to paths stored relative to the base directory.
    pub relative_prefix: String,
    /// Use `(linkMode = 2 OR linkMode = 3) AND contentType IN (...)` instead of
    /// the historical `linkMode = 2 OR (linkMode = 3 AND contentType IN (...))`.
    pub strict_link_filter: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string(), "djvu".to_string()],
            content_types: vec![
                "application/pdf".to_string(),
                "application/djvu".to_string(),
            ],
            relative_prefix: "attachments:".to_string(),
            strict_link_filter: false,
        }
    }
}

impl AppConfig {
    /// True if `file_name` ends in `.<ext>` for one of the configured extensions.
    pub fn has_supported_extension(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext.to_lowercase())))
    }

    pub fn is_supported_content_type(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|t| t == content_type)
    }
}

/// Load `zotfile-doctor.{toml,yaml,json}` from the working directory (optional)
/// and overlay `ZOTFILE_DOCTOR_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("zotfile-doctor").required(false))
        .add_source(
            Environment::with_prefix("ZOTFILE_DOCTOR")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("extensions")
                .with_list_parse_key("content_types"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
