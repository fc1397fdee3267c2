//! Template records for import by the presentation app.

use crate::config::TemplateConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// One importable template: the rendered HTML plus catalog metadata.
///
/// Field names on the wire follow what the importing application expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(rename = "template_name")]
    pub name: String,

    pub description: String,

    #[serde(rename = "html_template")]
    pub document: String,

    pub tags: Vec<String>,

    pub is_default: bool,

    /// Path of the presentation the template was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,
}

impl TemplateRecord {
    /// Build a record from rendered HTML and the configured metadata.
    pub fn from_document(
        name: impl Into<String>,
        document: impl Into<String>,
        config: &TemplateConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: config.description.clone(),
            document: document.into(),
            tags: config.tags.clone(),
            is_default: config.is_default,
            original_file: None,
        }
    }

    /// Record the source presentation path.
    pub fn with_original_file(mut self, path: impl Into<String>) -> Self {
        self.original_file = Some(path.into());
        self
    }

    /// Serialize the record. Non-ASCII text is written as-is.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Compact => serde_json::to_string(self),
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
        };
        json.map_err(|e| Error::Serialization(format!("Template record: {}", e)))
    }

    /// Parse a record previously written with [`TemplateRecord::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(format!("Template record: {}", e)))
    }
}
