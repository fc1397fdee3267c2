//! PPTX (Office Open XML) reader for presentation conversion.
//!
//! Reads .pptx files, which are ZIP archives containing XML documents, and
//! yields every slide's shapes as ordered [`ppt2html_core::ShapeRecord`]s.

pub mod parser;

pub use parser::PptxParser;
