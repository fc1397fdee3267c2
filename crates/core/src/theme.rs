//! Visual theme and stylesheet generation.
//!
//! A [`Theme`] maps every [`Role`] to one [`BoxStyle`]. The stylesheet is
//! generated from the theme, so the markup only ever refers to the fixed
//! class names from [`Role::class_name`].

use crate::types::Role;
use serde::{Deserialize, Serialize};

/// Indentation of rules inside the `<style>` element.
const RULE_INDENT: &str = "        ";
/// Indentation of declarations inside a rule.
const DECL_INDENT: &str = "            ";

/// Styling for the container emitted for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub background: String,
    pub color: String,

    /// Font size of the role's text, in pixels.
    pub font_size: u32,

    #[serde(default)]
    pub font_weight: Option<String>,
    #[serde(default)]
    pub line_height: Option<String>,
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default)]
    pub margin: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub border_left: Option<String>,
    #[serde(default)]
    pub border_right: Option<String>,
    #[serde(default)]
    pub border_radius: Option<String>,
    #[serde(default)]
    pub box_shadow: Option<String>,
    #[serde(default)]
    pub text_align: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub max_width: Option<String>,
    #[serde(default)]
    pub min_height: Option<String>,
}

impl BoxStyle {
    /// A style with only colors and font size set.
    pub fn new(background: impl Into<String>, color: impl Into<String>, font_size: u32) -> Self {
        Self {
            background: background.into(),
            color: color.into(),
            font_size,
            font_weight: None,
            line_height: None,
            padding: None,
            margin: None,
            border: None,
            border_left: None,
            border_right: None,
            border_radius: None,
            box_shadow: None,
            text_align: None,
            width: None,
            max_width: None,
            min_height: None,
        }
    }

    /// Declarations for the container rule, in output order.
    fn box_declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![
            ("background-color", self.background.clone()),
            ("color", self.color.clone()),
        ];

        let optional = [
            ("padding", &self.padding),
            ("border-radius", &self.border_radius),
            ("margin", &self.margin),
            ("box-shadow", &self.box_shadow),
            ("text-align", &self.text_align),
            ("width", &self.width),
            ("max-width", &self.max_width),
            ("min-height", &self.min_height),
            ("border", &self.border),
            ("border-left", &self.border_left),
            ("border-right", &self.border_right),
        ];
        decls.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone()))),
        );

        decls
    }

    /// Declarations for the text element inside the container.
    fn text_declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![("font-size", format!("{}px", self.font_size))];
        if let Some(weight) = &self.font_weight {
            decls.push(("font-weight", weight.clone()));
        }
        if let Some(line_height) = &self.line_height {
            decls.push(("line-height", line_height.clone()));
        }
        decls.push(("margin", "0".to_string()));
        decls
    }
}

/// Size and background of the per-slide container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideStyle {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub padding: String,
}

/// Styling for list items inside body blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStyle {
    pub font_size: u32,
    pub color: String,
    pub line_height: String,
}

/// A complete visual theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub font_family: String,
    pub page_background: String,
    pub slide: SlideStyle,
    pub title: BoxStyle,
    pub subtitle: BoxStyle,
    pub content: BoxStyle,
    pub info: BoxStyle,
    pub placeholder: BoxStyle,
    pub list: ListStyle,

    /// Text shown inside image placeholders.
    pub placeholder_caption: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::business_blue()
    }
}

impl Theme {
    /// The business blue theme.
    pub fn business_blue() -> Self {
        let title = BoxStyle {
            font_weight: Some("bold".to_string()),
            padding: Some("30px 60px".to_string()),
            margin: Some("0 0 40px".to_string()),
            border_radius: Some("10px".to_string()),
            box_shadow: Some("0 4px 12px rgba(0,0,0,0.15)".to_string()),
            text_align: Some("center".to_string()),
            max_width: Some("90%".to_string()),
            ..BoxStyle::new("#1a365d", "#ffffff", 40)
        };

        let subtitle = BoxStyle {
            font_weight: Some("bold".to_string()),
            padding: Some("20px 40px".to_string()),
            margin: Some("0 0 30px".to_string()),
            border_radius: Some("8px".to_string()),
            box_shadow: Some("0 2px 8px rgba(0,0,0,0.1)".to_string()),
            text_align: Some("center".to_string()),
            max_width: Some("80%".to_string()),
            border_left: Some("4px solid #1a365d".to_string()),
            border_right: Some("4px solid #1a365d".to_string()),
            ..BoxStyle::new("rgba(26,54,93,0.1)", "#1a365d", 28)
        };

        let content = BoxStyle {
            line_height: Some("1.5".to_string()),
            padding: Some("30px".to_string()),
            margin: Some("0 0 20px".to_string()),
            border_radius: Some("8px".to_string()),
            box_shadow: Some("0 2px 8px rgba(0,0,0,0.1)".to_string()),
            text_align: Some("center".to_string()),
            max_width: Some("80%".to_string()),
            border: Some("1px solid #e2e8f0".to_string()),
            ..BoxStyle::new("rgba(248,250,252,1)", "#333333", 20)
        };

        let info = BoxStyle {
            padding: Some("20px".to_string()),
            margin: Some("0 0 15px".to_string()),
            border_radius: Some("8px".to_string()),
            text_align: Some("center".to_string()),
            max_width: Some("60%".to_string()),
            border: Some("1px solid rgba(26,54,93,0.2)".to_string()),
            ..BoxStyle::new("rgba(26,54,93,0.05)", "#4a5568", 18)
        };

        let placeholder = BoxStyle {
            margin: Some("20px 0".to_string()),
            width: Some("100%".to_string()),
            max_width: Some("600px".to_string()),
            min_height: Some("300px".to_string()),
            border: Some("2px dashed #ccc".to_string()),
            ..BoxStyle::new("#e0e0e0", "#999999", 18)
        };

        Self {
            name: "business_blue".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            page_background: "#f0f2f5".to_string(),
            slide: SlideStyle {
                width: 1280,
                height: 720,
                background: "#f8fafc".to_string(),
                padding: "80px".to_string(),
            },
            title,
            subtitle,
            content,
            info,
            placeholder,
            list: ListStyle {
                font_size: 20,
                color: "#555555".to_string(),
                line_height: "1.6".to_string(),
            },
            placeholder_caption: "[Image: Please add image here]".to_string(),
        }
    }

    /// Style for a role.
    pub fn style(&self, role: Role) -> &BoxStyle {
        match role {
            Role::Title => &self.title,
            Role::Subtitle => &self.subtitle,
            Role::Content => &self.content,
            Role::Info => &self.info,
            Role::ImagePlaceholder => &self.placeholder,
        }
    }

    /// Generate the stylesheet body for this theme.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();

        push_rule(
            &mut css,
            "*",
            &[
                ("margin", "0".to_string()),
                ("padding", "0".to_string()),
                ("box-sizing", "border-box".to_string()),
            ],
        );
        push_rule(
            &mut css,
            "body",
            &[
                ("font-family", self.font_family.clone()),
                ("background-color", self.page_background.clone()),
                ("padding", "20px".to_string()),
            ],
        );
        push_rule(
            &mut css,
            ".slide",
            &[
                ("width", format!("{}px", self.slide.width)),
                ("height", format!("{}px", self.slide.height)),
                ("margin", "0 auto 40px".to_string()),
                ("background-color", self.slide.background.clone()),
                ("border-radius", "8px".to_string()),
                ("box-shadow", "0 4px 12px rgba(0,0,0,0.1)".to_string()),
                ("overflow", "hidden".to_string()),
                ("position", "relative".to_string()),
            ],
        );
        push_rule(
            &mut css,
            ".slide-content",
            &[
                ("width", "100%".to_string()),
                ("height", "100%".to_string()),
                ("padding", self.slide.padding.clone()),
                ("display", "flex".to_string()),
                ("flex-direction", "column".to_string()),
                ("justify-content", "center".to_string()),
                ("align-items", "center".to_string()),
            ],
        );

        for role in Role::ALL {
            let style = self.style(role);
            let class = format!(".{}", role.class_name());
            let mut decls = style.box_declarations();

            match role.text_tag() {
                Some(tag) => {
                    push_rule(&mut css, &class, &decls);
                    push_rule(
                        &mut css,
                        &format!("{} {}", class, tag),
                        &style.text_declarations(),
                    );
                }
                None => {
                    decls.push(("font-size", format!("{}px", style.font_size)));
                    decls.extend([
                        ("display", "flex".to_string()),
                        ("align-items", "center".to_string()),
                        ("justify-content", "center".to_string()),
                    ]);
                    push_rule(&mut css, &class, &decls);
                }
            }
        }

        push_rule(
            &mut css,
            "ul",
            &[
                ("margin", "0 0 0 30px".to_string()),
                ("text-align", "left".to_string()),
            ],
        );
        push_rule(
            &mut css,
            "li",
            &[
                ("font-size", format!("{}px", self.list.font_size)),
                ("line-height", self.list.line_height.clone()),
                ("color", self.list.color.clone()),
                ("margin-bottom", "10px".to_string()),
            ],
        );

        css
    }
}

fn push_rule(css: &mut String, selector: &str, decls: &[(&str, String)]) {
    css.push_str(RULE_INDENT);
    css.push_str(selector);
    css.push_str(" {\n");
    for (name, value) in decls {
        css.push_str(DECL_INDENT);
        css.push_str(name);
        css.push_str(": ");
        css.push_str(value);
        css.push_str(";\n");
    }
    css.push_str(RULE_INDENT);
    css.push_str("}\n");
}
