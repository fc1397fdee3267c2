//! Slide rendering: classified shapes to role-tagged blocks.

use crate::classify::ShapeClassifier;
use crate::config::ListMode;
use crate::normalize::TextNormalizer;
use crate::types::{Role, ShapeRecord};
use serde::{Deserialize, Serialize};

/// Characters that mark a line as a list item in [`ListMode::Detect`].
const LIST_MARKERS: &[char] = &['-', '•'];

/// One line of a rendered block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockLine {
    Paragraph(String),
    /// Bulleted line with its marker stripped.
    ListItem(String),
}

impl BlockLine {
    pub fn text(&self) -> &str {
        match self {
            BlockLine::Paragraph(text) | BlockLine::ListItem(text) => text,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockLine::ListItem(_))
    }
}

/// The output for one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub role: Role,

    /// Trimmed, non-empty lines in source order. Empty for placeholders.
    pub lines: Vec<BlockLine>,
}

impl RenderedBlock {
    /// An image placeholder block.
    pub fn placeholder() -> Self {
        Self {
            role: Role::ImagePlaceholder,
            lines: Vec::new(),
        }
    }
}

/// All blocks of one slide, in shape order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDocument {
    /// 1-based slide number.
    pub number: usize,
    pub blocks: Vec<RenderedBlock>,
}

impl SlideDocument {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Roles of the blocks, in order.
    pub fn roles(&self) -> Vec<Role> {
        self.blocks.iter().map(|b| b.role).collect()
    }
}

/// Rendered slides of a whole presentation, 1:1 with the source slides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPresentation {
    pub slides: Vec<SlideDocument>,
}

impl RenderedPresentation {
    pub fn block_count(&self) -> usize {
        self.slides.iter().map(|s| s.blocks.len()).sum()
    }
}

/// Turns a slide's shape records into a [`SlideDocument`].
#[derive(Debug, Clone, Default)]
pub struct SlideRenderer {
    classifier: ShapeClassifier,
    list_mode: ListMode,
}

impl SlideRenderer {
    /// Create a renderer with the default classifier and plain paragraphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given classifier.
    pub fn with_classifier(mut self, classifier: ShapeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the list-item handling mode.
    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }

    /// Render one slide.
    ///
    /// Text shapes yield one block each; picture shapes without usable text
    /// yield a placeholder; everything else is skipped.
    pub fn render(&self, number: usize, shapes: &[ShapeRecord]) -> SlideDocument {
        let mut slide = SlideDocument::new(number);

        for (idx, shape) in shapes.iter().enumerate() {
            match self.render_shape(shape) {
                Some(block) => slide.blocks.push(block),
                None => log::debug!("Slide {}: skipping empty shape {}", number, idx + 1),
            }
        }

        slide
    }

    /// Render a single shape, or `None` when it has nothing to show.
    pub fn render_shape(&self, shape: &ShapeRecord) -> Option<RenderedBlock> {
        if let Some(text) = shape.usable_text() {
            let role = self.classifier.classify(text);
            let lines = self.split_block_lines(role, text);
            return Some(RenderedBlock { role, lines });
        }

        if shape.is_picture {
            return Some(RenderedBlock::placeholder());
        }

        None
    }

    fn split_block_lines(&self, role: Role, text: &str) -> Vec<BlockLine> {
        let detect = self.list_mode == ListMode::Detect && !role.is_heading();

        TextNormalizer::split_lines(text)
            .into_iter()
            .map(|line| {
                if detect {
                    if let Some(item) = strip_list_marker(&line) {
                        return BlockLine::ListItem(item.to_string());
                    }
                }
                BlockLine::Paragraph(line)
            })
            .collect()
    }
}

/// The item text if `line` starts with a list marker. A bare marker is an
/// empty item.
fn strip_list_marker(line: &str) -> Option<&str> {
    line.strip_prefix(LIST_MARKERS).map(str::trim_start)
}
