//! Text normalization for extracted shape text.
//!
//! Readers hand over text with whatever line-break convention the source
//! used. Everything downstream splits on `\n`, so line breaks are unified
//! here before classification.

use crate::config::NormalizeConfig;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// CRLF, lone CR, vertical tab (soft line break) and the Unicode line separator.
static LINE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|[\r\x0B\x{2028}]").unwrap());

/// Regex to collapse multiple whitespace characters into one.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Text normalizer applied to shape text.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizeConfig,
}

impl TextNormalizer {
    /// Create a new text normalizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer from explicit settings.
    pub fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Set whether to apply Unicode NFC normalization.
    pub fn with_unicode_nfc(mut self, enabled: bool) -> Self {
        self.config.unicode_nfc = enabled;
        self
    }

    /// Set whether to collapse whitespace runs inside lines.
    pub fn with_collapse_whitespace(mut self, enabled: bool) -> Self {
        self.config.collapse_whitespace = enabled;
        self
    }

    /// Normalize a shape's text.
    ///
    /// - Unifies line breaks to `\n`
    /// - Optionally applies NFC normalization
    /// - Optionally collapses runs of spaces and tabs within each line
    ///
    /// Leading and trailing whitespace is left alone; the renderer trims.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = LINE_BREAK_REGEX.replace_all(text, "\n").into_owned();

        if self.config.unicode_nfc {
            result = result.nfc().collect();
        }

        if self.config.collapse_whitespace {
            result = result
                .split('\n')
                .map(|line| WHITESPACE_COLLAPSE_REGEX.replace_all(line, " "))
                .collect::<Vec<_>>()
                .join("\n");
        }

        result
    }

    /// Split text into trimmed, non-empty lines.
    pub fn split_lines(text: &str) -> Vec<String> {
        text.split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_unified() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize("a\r\nb"), "a\nb");
        assert_eq!(normalizer.normalize("a\rb"), "a\nb");
        assert_eq!(normalizer.normalize("a\x0Bb"), "a\nb");
        assert_eq!(normalizer.normalize("a\u{2028}b"), "a\nb");
        assert_eq!(normalizer.normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_nfc_is_opt_in() {
        // "e" + combining acute accent
        let raw = TextNormalizer::new();
        assert_eq!(raw.normalize("Cafe\u{301}"), "Cafe\u{301}");

        let composing = TextNormalizer::new().with_unicode_nfc(true);
        assert_eq!(composing.normalize("Cafe\u{301}"), "Caf\u{e9}");
    }

    #[test]
    fn test_collapse_whitespace_is_opt_in() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("Hello    world"), "Hello    world");

        let collapsing = TextNormalizer::new().with_collapse_whitespace(true);
        assert_eq!(
            collapsing.normalize("Hello \t  world\nnext    line"),
            "Hello world\nnext line"
        );
    }

    #[test]
    fn test_split_lines_filters_empty() {
        let lines = TextNormalizer::split_lines("  Hello \n\n \t\nWorld  ");
        assert_eq!(lines, vec!["Hello", "World"]);
    }

    #[test]
    fn test_split_lines_preserves_order() {
        let lines = TextNormalizer::split_lines("c\nb\na");
        assert_eq!(lines, vec!["c", "b", "a"]);
    }
}
