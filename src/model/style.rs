//! Style resolution.
//!
//! Nodes do not interpret style definitions themselves. At construction time
//! each node asks a [`StyleResolver`] for a [`StyleDescriptor`], which carries
//! the display class used by the renderers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::NodeKind;
use crate::error::Result;
use crate::xml::{Namespaces, ParseMode, XmlDocument};

/// Resolved display information for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Source style id (`w:pStyle/@w:val` or `w:tblStyle/@w:val`)
    pub style_id: Option<String>,

    /// HTML class name, possibly empty
    pub html_class: String,

    /// Heading level (1-6) for heading styles
    pub heading_level: Option<u8>,
}

impl StyleDescriptor {
    /// Create a descriptor with a class name.
    pub fn new(html_class: impl Into<String>) -> Self {
        Self {
            html_class: html_class.into(),
            ..Default::default()
        }
    }

    /// Set the source style id.
    pub fn with_style_id(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Set the heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = Some(level.clamp(1, 6));
        self
    }

    /// The HTML class name.
    pub fn html_class(&self) -> &str {
        &self.html_class
    }

    /// ` class="..."` for non-empty classes, otherwise an empty string.
    pub fn class_attribute(&self) -> String {
        class_attribute(&self.html_class)
    }
}

/// ` class="..."` for a non-empty class, otherwise an empty string.
pub(crate) fn class_attribute(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(
            " class=\"{}\"",
            html_escape::encode_double_quoted_attribute(class)
        )
    }
}

/// Produces style descriptors for nodes being constructed.
pub trait StyleResolver {
    /// Resolve the style of a node of `kind` referencing `style_id`.
    fn resolve(&self, kind: NodeKind, style_id: Option<&str>) -> Option<StyleDescriptor>;
}

/// Uses the style id itself as the class name.
///
/// `Heading1`..`Heading6` and `Title` are recognised as headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStyleResolver;

impl StyleResolver for DefaultStyleResolver {
    fn resolve(&self, _kind: NodeKind, style_id: Option<&str>) -> Option<StyleDescriptor> {
        let style_id = style_id?;
        let mut descriptor = StyleDescriptor::new(class_name(style_id)).with_style_id(style_id);
        if let Some(level) = heading_level_from_name(style_id) {
            descriptor = descriptor.with_heading_level(level);
        }
        Some(descriptor)
    }
}

/// Reduce a style name to a usable class name.
fn class_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect()
}

/// `Heading 2`, `heading2`, `Heading2` → 2; `Title` → 1.
fn heading_level_from_name(name: &str) -> Option<u8> {
    let lower = name.trim().to_ascii_lowercase();
    if lower == "title" {
        return Some(1);
    }
    let digits = lower.strip_prefix("heading")?.trim();
    match digits.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct StyleEntry {
    name: Option<String>,
    based_on: Option<String>,
    outline_level: Option<u8>,
}

/// Style definitions parsed from a `styles.xml` part.
///
/// Classes come from the style's display name (`w:name`), so `Intense Quote`
/// becomes `intense-quote`. Heading levels come from the name or from
/// `w:outlineLvl`, following `w:basedOn` chains. Unknown ids fall back to
/// [`DefaultStyleResolver`].
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleEntry>,
}

impl StyleSheet {
    /// Parse a `styles.xml` part.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = XmlDocument::parse(xml, ParseMode::Permissive)?;
        let ns = Namespaces::wordprocessing();
        let mut styles = HashMap::new();

        for style in doc.query(&ns, "w:style") {
            let Some(id) = style.attr(&ns, "w:styleId") else {
                continue;
            };
            let val = |path: &[&str]| {
                style
                    .path(&ns, path)
                    .and_then(|el| el.attr(&ns, "w:val"))
                    .map(str::to_string)
            };
            let entry = StyleEntry {
                name: val(&["w:name"]),
                based_on: val(&["w:basedOn"]),
                outline_level: val(&["w:pPr", "w:outlineLvl"]).and_then(|v| v.parse().ok()),
            };
            styles.insert(id.to_string(), entry);
        }

        log::debug!("Loaded {} style definitions", styles.len());
        Ok(Self { styles })
    }

    /// Number of style definitions.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if no styles were defined.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn heading_level(&self, id: &str) -> Option<u8> {
        let mut current = Some(id);
        // Bounded walk; basedOn cycles exist in the wild
        for _ in 0..self.styles.len().max(1) {
            let entry = self.styles.get(current?)?;
            if let Some(level) = entry.name.as_deref().and_then(heading_level_from_name) {
                return Some(level);
            }
            // Levels 9 and up mean body text and override anything inherited
            if let Some(level) = entry.outline_level {
                return (level < 9).then(|| (level + 1).min(6));
            }
            current = entry.based_on.as_deref();
        }
        None
    }
}

impl StyleResolver for StyleSheet {
    fn resolve(&self, kind: NodeKind, style_id: Option<&str>) -> Option<StyleDescriptor> {
        let id = style_id?;
        let Some(entry) = self.styles.get(id) else {
            return DefaultStyleResolver.resolve(kind, style_id);
        };

        let class = class_name(entry.name.as_deref().unwrap_or(id)).to_ascii_lowercase();
        let mut descriptor = StyleDescriptor::new(class).with_style_id(id);
        if kind != NodeKind::Table {
            if let Some(level) = self.heading_level(id) {
                descriptor = descriptor.with_heading_level(level);
            }
        }
        Some(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="ChapterTitle"><w:name w:val="Chapter Title"/><w:pPr><w:outlineLvl w:val="0"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="SubChapter"><w:name w:val="Sub Chapter"/><w:basedOn w:val="ChapterTitle"/></w:style>
  <w:style w:type="paragraph" w:styleId="IntenseQuote"><w:name w:val="Intense Quote"/></w:style>
  <w:style w:type="paragraph" w:styleId="Minor"><w:name w:val="Minor"/><w:pPr><w:outlineLvl w:val="7"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="ChapterBody"><w:name w:val="Chapter Body"/><w:basedOn w:val="ChapterTitle"/><w:pPr><w:outlineLvl w:val="9"/></w:pPr></w:style>
</w:styles>"#;

    #[test]
    fn test_default_resolver() {
        let resolver = DefaultStyleResolver;
        assert!(resolver.resolve(NodeKind::Paragraph, None).is_none());

        let style = resolver
            .resolve(NodeKind::Paragraph, Some("ListParagraph"))
            .unwrap();
        assert_eq!(style.html_class(), "ListParagraph");
        assert_eq!(style.heading_level, None);

        let heading = resolver.resolve(NodeKind::Paragraph, Some("Heading3")).unwrap();
        assert_eq!(heading.heading_level, Some(3));
    }

    #[test]
    fn test_class_attribute() {
        assert_eq!(StyleDescriptor::new("").class_attribute(), "");
        assert_eq!(
            StyleDescriptor::new("note").class_attribute(),
            " class=\"note\""
        );
    }

    #[test]
    fn test_heading_level_from_name() {
        assert_eq!(heading_level_from_name("heading 1"), Some(1));
        assert_eq!(heading_level_from_name("Heading6"), Some(6));
        assert_eq!(heading_level_from_name("Heading7"), None);
        assert_eq!(heading_level_from_name("Title"), Some(1));
        assert_eq!(heading_level_from_name("Normal"), None);
    }

    #[test]
    fn test_stylesheet_classes() {
        let sheet = StyleSheet::from_xml(STYLES).unwrap();
        assert_eq!(sheet.len(), 7);

        let quote = sheet
            .resolve(NodeKind::Paragraph, Some("IntenseQuote"))
            .unwrap();
        assert_eq!(quote.html_class(), "intense-quote");
        assert_eq!(quote.style_id.as_deref(), Some("IntenseQuote"));
    }

    #[test]
    fn test_stylesheet_headings() {
        let sheet = StyleSheet::from_xml(STYLES).unwrap();
        let h2 = sheet.resolve(NodeKind::Paragraph, Some("Heading2")).unwrap();
        assert_eq!(h2.heading_level, Some(2));

        // outlineLvl is zero-based and inherited through basedOn
        let sub = sheet.resolve(NodeKind::Paragraph, Some("SubChapter")).unwrap();
        assert_eq!(sub.heading_level, Some(1));

        let normal = sheet.resolve(NodeKind::Paragraph, Some("Normal")).unwrap();
        assert_eq!(normal.heading_level, None);

        let minor = sheet.resolve(NodeKind::Paragraph, Some("Minor")).unwrap();
        assert_eq!(minor.heading_level, Some(6));
    }

    #[test]
    fn test_body_text_outline_level_is_not_a_heading() {
        let sheet = StyleSheet::from_xml(STYLES).unwrap();
        let body = sheet
            .resolve(NodeKind::Paragraph, Some("ChapterBody"))
            .unwrap();
        assert_eq!(body.heading_level, None);
        assert_eq!(body.html_class(), "chapter-body");
    }

    #[test]
    fn test_stylesheet_unknown_falls_back() {
        let sheet = StyleSheet::from_xml(STYLES).unwrap();
        let style = sheet.resolve(NodeKind::Paragraph, Some("Custom")).unwrap();
        assert_eq!(style.html_class(), "Custom");
    }
}
