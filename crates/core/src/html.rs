//! HTML document assembly.
//!
//! Every role maps to exactly one container structure; only the escaped
//! text inside it varies. Slides are wrapped in `<div class="slide"
//! id="slide-N">` containers in input order.

use crate::render::{BlockLine, RenderedBlock, RenderedPresentation, SlideDocument};
use crate::theme::Theme;
use crate::types::Role;
use quick_xml::escape::escape;

const SLIDE_INDENT: &str = "    ";
const BLOCK_INDENT: &str = "            ";
const TEXT_INDENT: &str = "                ";
const ITEM_INDENT: &str = "                    ";

/// Writes a [`RenderedPresentation`] as a standalone HTML document.
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    theme: Theme,
    document_title: String,
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self {
            theme: Theme::business_blue(),
            document_title: "Business Blue PPT Template".to_string(),
        }
    }
}

impl HtmlWriter {
    /// Create a writer with the business blue theme.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the `<title>` text.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Write the full document.
    pub fn write(&self, presentation: &RenderedPresentation) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{}</title>\n",
            escape_html(&self.document_title)
        ));
        html.push_str("    <style>\n");
        html.push_str(&self.theme.stylesheet());
        html.push_str("    </style>\n</head>\n<body>\n");

        for (idx, slide) in presentation.slides.iter().enumerate() {
            self.write_slide(&mut html, idx + 1, slide);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write one slide container. `position` is the 1-based id suffix.
    fn write_slide(&self, html: &mut String, position: usize, slide: &SlideDocument) {
        html.push_str(&format!(
            "{}<div class=\"slide\" id=\"slide-{}\">\n",
            SLIDE_INDENT, position
        ));
        html.push_str(SLIDE_INDENT);
        html.push_str("    <div class=\"slide-content\">\n");

        for block in &slide.blocks {
            self.write_block(html, block);
        }

        html.push_str(SLIDE_INDENT);
        html.push_str("    </div>\n");
        html.push_str(SLIDE_INDENT);
        html.push_str("</div>\n");
    }

    /// Write one block as its role's container.
    pub fn write_block(&self, html: &mut String, block: &RenderedBlock) {
        html.push_str(&format!(
            "{}<div class=\"{}\">\n",
            BLOCK_INDENT,
            block.role.class_name()
        ));

        match block.role {
            Role::Title | Role::Subtitle => {
                let tag = block.role.text_tag().unwrap_or("h1");
                let text = block
                    .lines
                    .iter()
                    .map(|l| escape_html(l.text()))
                    .collect::<Vec<_>>()
                    .join("<br>");
                html.push_str(&format!("{}<{}>{}</{}>\n", TEXT_INDENT, tag, text, tag));
            }
            Role::Content | Role::Info => write_body_lines(html, &block.lines),
            Role::ImagePlaceholder => {
                html.push_str(TEXT_INDENT);
                html.push_str(&escape_html(&self.theme.placeholder_caption));
                html.push('\n');
            }
        }

        html.push_str(BLOCK_INDENT);
        html.push_str("</div>\n");
    }
}

/// Paragraph lines become `<p>`; runs of list items share one `<ul>`.
fn write_body_lines(html: &mut String, lines: &[BlockLine]) {
    let mut in_list = false;

    for line in lines {
        if line.is_list_item() != in_list {
            html.push_str(TEXT_INDENT);
            html.push_str(if in_list { "</ul>\n" } else { "<ul>\n" });
            in_list = !in_list;
        }

        let (indent, tag) = if in_list {
            (ITEM_INDENT, "li")
        } else {
            (TEXT_INDENT, "p")
        };
        html.push_str(&format!("{}<{tag}>{}</{tag}>\n", indent, escape_html(line.text())));
    }

    if in_list {
        html.push_str(TEXT_INDENT);
        html.push_str("</ul>\n");
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    escape(text).into_owned()
}
