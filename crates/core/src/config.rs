//! Conversion configuration.
//!
//! Every heuristic constant lives here so callers can tune it. All structs
//! deserialize with defaults, so a configuration file only has to name the
//! values it changes.

use crate::error::{Error, Result};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Thresholds and keyword lists used by the shape classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Substrings that mark a shape as a title. Matched case-sensitively.
    pub title_keywords: Vec<String>,

    /// Substrings that mark a shape as a subtitle. Matched case-sensitively.
    pub subtitle_keywords: Vec<String>,

    /// Single-line texts shorter than this many characters are titles.
    pub title_max_chars: usize,

    /// Texts longer than this many characters are body content.
    pub content_min_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            title_keywords: vec!["标题".to_string(), "TITLE".to_string(), "title".to_string()],
            subtitle_keywords: vec!["subtitle".to_string(), "SUBTITLE".to_string()],
            title_max_chars: 30,
            content_min_chars: 100,
        }
    }
}

impl ClassifierConfig {
    /// Create a classifier config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title keywords.
    pub fn with_title_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the subtitle keywords.
    pub fn with_subtitle_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtitle_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the single-line title cutoff.
    pub fn with_title_max_chars(mut self, chars: usize) -> Self {
        self.title_max_chars = chars;
        self
    }

    /// Set the body content cutoff.
    pub fn with_content_min_chars(mut self, chars: usize) -> Self {
        self.content_min_chars = chars;
        self
    }
}

/// How the renderer treats lines that start with a bullet marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Every line is a paragraph.
    #[default]
    Plain,
    /// Lines starting with `-` or `•` in body blocks become list items.
    Detect,
}

/// Text cleanup applied to shape text before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Apply Unicode NFC normalization.
    pub unicode_nfc: bool,

    /// Collapse runs of spaces and tabs within a line into one space.
    pub collapse_whitespace: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            unicode_nfc: false,
            collapse_whitespace: false,
        }
    }
}

/// Metadata stamped onto the exported template record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub description: String,
    pub tags: Vec<String>,
    pub is_default: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            description: "Business blue presentation template".to_string(),
            tags: vec![
                "business".to_string(),
                "blue".to_string(),
                "professional".to_string(),
            ],
            is_default: false,
        }
    }
}

/// Complete configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub classifier: ClassifierConfig,
    pub theme: Theme,
    pub list_mode: ListMode,
    pub normalize: NormalizeConfig,

    /// Text of the HTML `<title>` element.
    pub document_title: String,

    pub template: TemplateConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            theme: Theme::business_blue(),
            list_mode: ListMode::default(),
            normalize: NormalizeConfig::default(),
            document_title: "Business Blue PPT Template".to_string(),
            template: TemplateConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    ///
    /// The file is merged over the serialized defaults before it is read
    /// back, so nested values such as a single color of one theme role can
    /// be overridden on their own.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: Value =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        let mut merged =
            serde_json::to_value(Self::default()).map_err(|e| Error::Config(e.to_string()))?;
        merge_json(&mut merged, overrides);
        serde_json::from_value(merged).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the list-item handling mode.
    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeConfig) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the HTML document title.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    pub fn with_template(mut self, template: TemplateConfig) -> Self {
        self.template = template;
        self
    }
}

/// Recursively overlay `overrides` onto `base`. Objects merge key by key;
/// any other value replaces what was there.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(config.title_max_chars, 30);
        assert_eq!(config.content_min_chars, 100);
        assert!(config.title_keywords.iter().any(|k| k == "标题"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "classifier": { "title_max_chars": 50 },
            "list_mode": "detect"
        }"#;
        let config = ConverterConfig::from_json_str(json).unwrap();

        assert_eq!(config.classifier.title_max_chars, 50);
        assert_eq!(config.classifier.content_min_chars, 100);
        assert_eq!(config.list_mode, ListMode::Detect);
        assert_eq!(config.theme, Theme::business_blue());
        assert_eq!(config.document_title, "Business Blue PPT Template");
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = ConverterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ConverterConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ConverterConfig::from_json_str(r#"{"list_mode": "bullets"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = ConverterConfig::from_path("/nonexistent/ppt2html.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builders() {
        let config = ConverterConfig::new()
            .with_list_mode(ListMode::Detect)
            .with_document_title("Deck")
            .with_classifier(ClassifierConfig::new().with_title_keywords(["Agenda"]));

        assert_eq!(config.list_mode, ListMode::Detect);
        assert_eq!(config.document_title, "Deck");
        assert_eq!(config.classifier.title_keywords, vec!["Agenda"]);
    }

    #[test]
    fn test_partial_theme_override() {
        let config =
            ConverterConfig::from_json_str(r##"{"theme":{"title":{"background":"#000000"}}}"##)
                .unwrap();
        let default = Theme::business_blue();

        assert_eq!(config.theme.title.background, "#000000");
        assert_eq!(config.theme.title.color, default.title.color);
        assert_eq!(config.theme.title.font_size, default.title.font_size);
        assert_eq!(config.theme.title.padding, default.title.padding);
        assert_eq!(config.theme.subtitle, default.subtitle);
        assert_eq!(config.theme.slide, default.slide);
    }

    #[test]
    fn test_partial_slide_and_list_styles() {
        let json = r##"{"theme":{"slide":{"width":1920},"list":{"color":"#111111"}}}"##;
        let config = ConverterConfig::from_json_str(json).unwrap();

        assert_eq!(config.theme.slide.width, 1920);
        assert_eq!(config.theme.slide.height, 720);
        assert_eq!(config.theme.list.color, "#111111");
        assert_eq!(config.theme.list.font_size, 20);
    }

    #[test]
    fn test_keyword_list_replaced_not_merged() {
        let config =
            ConverterConfig::from_json_str(r#"{"classifier":{"title_keywords":["Agenda"]}}"#)
                .unwrap();
        assert_eq!(config.classifier.title_keywords, vec!["Agenda"]);
    }

    #[test]
    fn test_override_with_wrong_type_is_config_error() {
        let err =
            ConverterConfig::from_json_str(r#"{"theme":{"title":{"font_size":"large"}}}"#)
                .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
