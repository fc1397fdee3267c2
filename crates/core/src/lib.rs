//! Core domain types, shape classification, slide rendering, and business
//! theme HTML output for PowerPoint conversion.

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod html;
pub mod normalize;
pub mod render;
pub mod template;
pub mod theme;
pub mod types;

pub use classify::ShapeClassifier;
pub use config::{ClassifierConfig, ConverterConfig, ListMode, NormalizeConfig, TemplateConfig};
pub use convert::Converter;
pub use error::{Error, Result};
pub use html::HtmlWriter;
pub use normalize::TextNormalizer;
pub use render::{BlockLine, RenderedBlock, RenderedPresentation, SlideDocument, SlideRenderer};
pub use template::{JsonFormat, TemplateRecord};
pub use theme::{BoxStyle, Theme};
pub use types::{Presentation, PresentationFormat, Role, ShapeRecord, SourceSlide};
