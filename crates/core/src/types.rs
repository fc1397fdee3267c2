//! Domain types for extracted presentation content and shape roles.

use serde::{Deserialize, Serialize};

/// An entire presentation as produced by a reader backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Detected format of the source file.
    pub format: PresentationFormat,

    /// Slides in presentation order.
    pub slides: Vec<SourceSlide>,
}

impl Presentation {
    /// Create a new presentation with the given filename and format.
    pub fn new(filename: impl Into<String>, format: PresentationFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: SourceSlide) {
        self.slides.push(slide);
    }

    /// Total number of shapes across all slides.
    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(|s| s.shapes.len()).sum()
    }

    /// The filename without its extension.
    pub fn stem(&self) -> &str {
        match self.filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.filename,
        }
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected so it can be rejected clearly.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// A single slide as a reader saw it: shapes in their original order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Shapes in document order. The order is iteration order only.
    pub shapes: Vec<ShapeRecord>,
}

impl SourceSlide {
    /// Create a new, empty slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Add a shape to this slide.
    pub fn add_shape(&mut self, shape: ShapeRecord) {
        self.shapes.push(shape);
    }
}

/// One shape's extracted content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Whether the shape carries a text frame at all.
    pub has_text: bool,

    /// Text with paragraphs separated by `\n`. Empty when `has_text` is false.
    pub text: String,

    /// Whether the shape is a picture.
    pub is_picture: bool,
}

impl ShapeRecord {
    /// A shape with a text frame.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            has_text: true,
            text: text.into(),
            is_picture: false,
        }
    }

    /// A picture shape without text.
    pub fn picture() -> Self {
        Self {
            has_text: false,
            text: String::new(),
            is_picture: true,
        }
    }

    /// A shape with neither text nor picture content (connectors, empty frames).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The trimmed text, if the shape has any usable text.
    pub fn usable_text(&self) -> Option<&str> {
        if !self.has_text {
            return None;
        }
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Presentational role inferred for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Title,
    Subtitle,
    Content,
    Info,
    ImagePlaceholder,
}

impl Role {
    /// All roles, in stylesheet order.
    pub const ALL: [Role; 5] = [
        Role::Title,
        Role::Subtitle,
        Role::Content,
        Role::Info,
        Role::ImagePlaceholder,
    ];

    /// CSS class of the container emitted for this role.
    pub fn class_name(self) -> &'static str {
        match self {
            Role::Title => "title-box",
            Role::Subtitle => "subtitle-box",
            Role::Content => "content-box",
            Role::Info => "info-box",
            Role::ImagePlaceholder => "placeholder",
        }
    }

    /// Element wrapping the text inside the container, if any.
    pub fn text_tag(self) -> Option<&'static str> {
        match self {
            Role::Title => Some("h1"),
            Role::Subtitle => Some("h2"),
            Role::Content | Role::Info => Some("p"),
            Role::ImagePlaceholder => None,
        }
    }

    /// Whether this role renders as a heading.
    pub fn is_heading(self) -> bool {
        matches!(self, Role::Title | Role::Subtitle)
    }
}
