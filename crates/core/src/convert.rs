//! End-to-end conversion of an extracted presentation.

use crate::classify::ShapeClassifier;
use crate::config::ConverterConfig;
use crate::html::HtmlWriter;
use crate::normalize::TextNormalizer;
use crate::render::{RenderedPresentation, SlideRenderer};
use crate::template::TemplateRecord;
use crate::types::{Presentation, ShapeRecord};

/// Runs normalization, classification, rendering and HTML assembly with one
/// configuration.
#[derive(Debug, Clone)]
pub struct Converter {
    normalizer: TextNormalizer,
    renderer: SlideRenderer,
    writer: HtmlWriter,
    config: ConverterConfig,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        let normalizer = TextNormalizer::with_config(config.normalize.clone());
        let renderer = SlideRenderer::new()
            .with_classifier(ShapeClassifier::with_config(config.classifier.clone()))
            .with_list_mode(config.list_mode);
        let writer = HtmlWriter::new()
            .with_theme(config.theme.clone())
            .with_document_title(config.document_title.clone());

        Self {
            normalizer,
            renderer,
            writer,
            config,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Render every slide, in order.
    pub fn render(&self, presentation: &Presentation) -> RenderedPresentation {
        let slides = presentation
            .slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| {
                let shapes: Vec<ShapeRecord> = slide
                    .shapes
                    .iter()
                    .map(|shape| self.normalize_shape(shape))
                    .collect();
                let rendered = self.renderer.render(idx + 1, &shapes);
                log::debug!(
                    "Slide {}: {} shapes, {} blocks",
                    idx + 1,
                    shapes.len(),
                    rendered.blocks.len()
                );
                rendered
            })
            .collect();

        RenderedPresentation { slides }
    }

    /// Render the presentation to a standalone HTML document.
    pub fn to_html(&self, presentation: &Presentation) -> String {
        self.writer.write(&self.render(presentation))
    }

    /// Build the template record for the presentation.
    pub fn to_template(&self, presentation: &Presentation) -> TemplateRecord {
        TemplateRecord::from_document(
            presentation.stem(),
            self.to_html(presentation),
            &self.config.template,
        )
    }

    fn normalize_shape(&self, shape: &ShapeRecord) -> ShapeRecord {
        if !shape.has_text {
            return shape.clone();
        }
        ShapeRecord {
            text: self.normalizer.normalize(&shape.text),
            ..shape.clone()
        }
    }
}
