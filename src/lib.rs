//! # undocx
//!
//! WordprocessingML body to HTML conversion for Rust.
//!
//! This library reads the main document part of a `.docx` package
//! (`word/document.xml`), builds a tree of paragraphs and tables, rebuilds
//! the list nesting that WordprocessingML only stores as per-paragraph levels,
//! and renders the result as HTML, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{load_file, render};
//!
//! fn main() -> undocx::Result<()> {
//!     // Load an extracted document part
//!     let doc = load_file("word/document.xml")?;
//!
//!     // Convert to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **List reconstruction**: `<ul>`/`<li>` nesting from numbering levels, inside tables too
//! - **Pluggable styles**: resolve style ids to classes and headings via [`StyleResolver`]
//! - **Attachments**: hyperlinks and images resolved through caller-supplied registries
//! - **Permissive parsing**: malformed XML is recovered unless strict mode is requested

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod units;
pub mod xml;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Alignment, Attachments, DefaultStyleResolver, Document, FileAttachment, Inline,
    LinkAttachment, LinkTarget, Node, NodeContent, NodeId, NodeKind, Paragraph, StyleDescriptor,
    StyleResolver, StyleSheet, Table, TableCell, TableRow, TextRun, TextStyle, MAX_ILVL,
};
pub use parser::{BodyParser, LoadOptions, ParseMode};
pub use render::{JsonFormat, RenderFormat, RenderOptions, RenderResult, RenderStats};
pub use units::twips_to_points;

use std::io::Read;
use std::path::Path;

/// Load a document body from XML text.
///
/// # Example
///
/// ```
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body><w:p/></w:body>
/// </w:document>"#;
/// let doc = undocx::load_str(xml).unwrap();
/// assert_eq!(doc.root().len(), 1);
/// ```
pub fn load_str(xml: &str) -> Result<Document> {
    BodyParser::from_xml(xml).parse()
}

/// Load a document body from XML text with custom options.
pub fn load_str_with_options(xml: &str, options: LoadOptions) -> Result<Document> {
    BodyParser::from_xml_with_options(xml, options).parse()
}

/// Load a document body from bytes.
///
/// A UTF-8 byte order mark is accepted; invalid UTF-8 is replaced.
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    BodyParser::from_bytes(data).parse()
}

/// Load a `document.xml` file.
///
/// # Example
///
/// ```no_run
/// use undocx::load_file;
///
/// let doc = load_file("word/document.xml").unwrap();
/// println!("Nodes: {}", doc.nodes().len());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    BodyParser::open(path)?.parse()
}

/// Load a `document.xml` file with custom options.
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    BodyParser::open_with_options(path, options)?.parse()
}

/// Load a document body from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    BodyParser::from_reader(reader)?.parse()
}

/// Extract plain text from a `document.xml` file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a `document.xml` file to HTML.
///
/// # Example
///
/// ```no_run
/// let html = undocx::to_html("word/document.xml").unwrap();
/// std::fs::write("output.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a `document.xml` file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = load_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a `document.xml` file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for loading and converting document bodies.
///
/// # Example
///
/// ```no_run
/// use undocx::{Attachments, FileAttachment, Undocx};
///
/// let html = Undocx::new()
///     .strict()
///     .close_trailing_lists()
///     .with_attachments(Attachments::new().with_file(FileAttachment::new("rId4", "image1.png")))
///     .with_image_prefix("media/")
///     .load("word/document.xml")?
///     .to_html()?;
/// # Ok::<(), undocx::Error>(())
/// ```
pub struct Undocx {
    load_options: LoadOptions,
    render_options: RenderOptions,
    resolver: Option<Box<dyn StyleResolver>>,
    attachments: Attachments,
}

impl Undocx {
    /// Create a new Undocx builder.
    pub fn new() -> Self {
        Self {
            load_options: LoadOptions::default(),
            render_options: RenderOptions::default(),
            resolver: None,
            attachments: Attachments::new(),
        }
    }

    /// Reject malformed XML.
    pub fn strict(mut self) -> Self {
        self.load_options = self.load_options.strict();
        self
    }

    /// Close lists left open at the end of a sibling sequence.
    pub fn close_trailing_lists(mut self) -> Self {
        self.load_options = self.load_options.with_close_trailing_lists(true);
        self
    }

    /// Leave level-0 nodes after a list without an `<li>` opening.
    pub fn balanced_list_items(mut self) -> Self {
        self.load_options = self.load_options.with_balanced_list_items(true);
        self
    }

    /// Use a custom style resolver.
    pub fn with_style_resolver(mut self, resolver: impl StyleResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Resolve styles from a `styles.xml` part.
    pub fn with_styles_xml(self, styles_xml: &str) -> Result<Self> {
        Ok(self.with_style_resolver(StyleSheet::from_xml(styles_xml)?))
    }

    /// Attach link and file registries.
    pub fn with_attachments(mut self, attachments: Attachments) -> Self {
        self.attachments = attachments;
        self
    }

    /// Enable or disable images.
    pub fn with_images(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_images(include);
        self
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_prefix(prefix);
        self
    }

    /// Set the list marker used in text output.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Load a `document.xml` file and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<UndocxResult> {
        let parser = BodyParser::open_with_options(path, self.load_options.clone())?;
        self.finish(parser)
    }

    /// Load XML text.
    pub fn load_str(self, xml: &str) -> Result<UndocxResult> {
        let parser = BodyParser::from_xml_with_options(xml, self.load_options.clone());
        self.finish(parser)
    }

    /// Load XML from bytes.
    pub fn load_bytes(self, data: &[u8]) -> Result<UndocxResult> {
        let parser = BodyParser::from_bytes_with_options(data, self.load_options.clone());
        self.finish(parser)
    }

    fn finish(self, parser: BodyParser) -> Result<UndocxResult> {
        let mut parser = parser.with_attachments(self.attachments);
        if let Some(resolver) = self.resolver {
            parser = parser.with_boxed_style_resolver(resolver);
        }
        Ok(UndocxResult {
            document: parser.parse()?,
            render_options: self.render_options,
        })
    }
}

impl Default for Undocx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of loading a document body.
pub struct UndocxResult {
    /// The loaded document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UndocxResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render in any format along with document statistics.
    pub fn render_with_stats(&self, format: RenderFormat) -> Result<RenderResult> {
        let options = self.render_options.clone().with_format(format);
        render::render_with_stats(&self.document, &options)
    }

    /// Get plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
