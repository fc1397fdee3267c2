//! Shape role classification.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. title keyword → [`Role::Title`]
//! 2. subtitle keyword → [`Role::Subtitle`]
//! 3. single line shorter than `title_max_chars` → [`Role::Title`]
//! 4. longer than `content_min_chars` → [`Role::Content`]
//! 5. anything else → [`Role::Info`]
//!
//! Keyword rules dominate the length rules, so a long paragraph that
//! mentions "title" is still a title. Single-line text between the two
//! cutoffs falls through to `Info`.

use crate::config::ClassifierConfig;
use crate::types::Role;

/// Assigns a [`Role`] to a text shape.
#[derive(Debug, Clone, Default)]
pub struct ShapeClassifier {
    config: ClassifierConfig,
}

impl ShapeClassifier {
    /// Create a classifier with the default thresholds and keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from explicit settings.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a shape's text.
    ///
    /// Only call this for shapes with non-empty trimmed text; picture shapes
    /// are placeholders and never reach the classifier. The result is always
    /// one of the text roles, never [`Role::ImagePlaceholder`].
    pub fn classify(&self, text: &str) -> Role {
        let text = text.trim();

        if contains_any(text, &self.config.title_keywords) {
            return Role::Title;
        }

        if contains_any(text, &self.config.subtitle_keywords) {
            return Role::Subtitle;
        }

        if !text.contains('\n') && text.chars().count() < self.config.title_max_chars {
            return Role::Title;
        }

        if text.chars().count() > self.config.content_min_chars {
            return Role::Content;
        }

        Role::Info
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Role {
        ShapeClassifier::new().classify(text)
    }

    #[test]
    fn test_cjk_title_keyword() {
        assert_eq!(classify("会议标题"), Role::Title);
    }

    #[test]
    fn test_english_title_keywords() {
        assert_eq!(classify("Click to add TITLE here, it can be long enough"), Role::Title);
        assert_eq!(classify("Slide title"), Role::Title);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        // "Title" matches neither "TITLE" nor "title"; 50 chars single line
        let text = "Title of the quarterly report for the sales region";
        assert_eq!(text.chars().count(), 50);
        assert_eq!(classify(text), Role::Info);
    }

    #[test]
    fn test_keyword_beats_length() {
        // Known quirk: a long paragraph containing "title" is a heading.
        let text = format!("{}\nthe title of this section is buried in body text", "x".repeat(200));
        assert_eq!(classify(&text), Role::Title);
    }

    #[test]
    fn test_default_subtitle_shadowed_by_title_keyword() {
        // "subtitle" contains "title", and "SUBTITLE" contains "TITLE".
        assert_eq!(classify("subtitle goes here"), Role::Title);
        assert_eq!(classify("SUBTITLE"), Role::Title);
    }

    #[test]
    fn test_subtitle_keyword_with_custom_title_keywords() {
        let classifier = ShapeClassifier::with_config(
            ClassifierConfig::new().with_title_keywords(["标题", "TITLE"]),
        );
        assert_eq!(classifier.classify("a subtitle for the deck"), Role::Subtitle);
        assert_eq!(classifier.classify("TITLE and subtitle"), Role::Title);
    }

    #[test]
    fn test_short_single_line_is_title() {
        let text = "This is a short line";
        assert!(text.chars().count() < 30);
        assert_eq!(classify(text), Role::Title);
    }

    #[test]
    fn test_short_cjk_single_line_counts_chars() {
        // 21 CJK characters are 63 bytes but only 21 chars.
        let text = "季度销售业绩回顾与下一阶段工作重点安排说明";
        assert!(text.len() > 30);
        assert!(text.chars().count() < 30);
        assert_eq!(classify(text), Role::Title);
    }

    #[test]
    fn test_title_cutoff_is_exclusive() {
        let text = "a".repeat(29);
        assert_eq!(classify(&text), Role::Title);
        let text = "a".repeat(30);
        assert_eq!(classify(&text), Role::Info);
    }

    #[test]
    fn test_single_line_gap_is_info() {
        let text = "A single line of sixty characters, give or take a few more";
        assert!(text.chars().count() >= 30 && text.chars().count() <= 100);
        assert_eq!(classify(text), Role::Info);
    }

    #[test]
    fn test_long_multiline_is_content() {
        let text = format!("{}\n{}\n{}", "a".repeat(50), "b".repeat(50), "c".repeat(48));
        assert_eq!(text.chars().count(), 150);
        assert_eq!(classify(&text), Role::Content);
    }

    #[test]
    fn test_long_single_line_is_content() {
        assert_eq!(classify(&"z".repeat(101)), Role::Content);
        assert_eq!(classify(&"z".repeat(100)), Role::Info);
    }

    #[test]
    fn test_short_multiline_is_info() {
        assert_eq!(classify("Contact\nsales@example.com"), Role::Info);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(classify("\n\n  Short heading  \n"), Role::Title);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = ShapeClassifier::with_config(
            ClassifierConfig::new()
                .with_title_max_chars(80)
                .with_content_min_chars(20),
        );
        let text = "A single line of sixty characters, give or take a few more";
        assert_eq!(classifier.classify(text), Role::Title);
        assert_eq!(classifier.classify("line one here\nline two here"), Role::Content);
    }

    #[test]
    fn test_empty_keywords_never_match() {
        let classifier =
            ShapeClassifier::with_config(ClassifierConfig::new().with_title_keywords([""]));
        assert_eq!(classifier.classify("Contact\nsales@example.com"), Role::Info);
    }

    #[test]
    fn test_classify_is_pure() {
        let classifier = ShapeClassifier::new();
        let long = "long ".repeat(40);
        let samples = ["会议标题", "short", "multi\nline", long.as_str()];
        for sample in samples {
            assert_eq!(classifier.classify(sample), classifier.classify(sample));
            assert_ne!(classifier.classify(sample), Role::ImagePlaceholder);
        }
    }
}
