//! Document-level types.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::{
    Attachments, FileAttachment, LinkAttachment, Node, NodeId, NodeKind, StyleResolver,
};
use crate::error::Result;
use crate::parser::{self, BodyParser, LoadOptions};
use crate::render::{self, RenderFormat, RenderOptions, RenderStats};
use crate::xml::{Namespaces, XmlDocument};

/// Prefix of every generated HTML id.
pub const HTML_ID_PREFIX: &str = "docx_";

/// A loaded document body.
///
/// Owns the parsed XML, the construction record (every node at every depth,
/// in construction order), the sequence of top-level nodes in source order,
/// and the attachment registries.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(skip)]
    xml: XmlDocument,

    #[serde(skip)]
    namespaces: Namespaces,

    /// Construction record
    nodes: Vec<Node>,

    /// Top-level nodes in source order
    root: Vec<NodeId>,

    /// Link and file registries
    attachments: Attachments,
}

impl Document {
    /// Load a document body from XML text with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use undocx::Document;
    ///
    /// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    ///   <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
    /// </w:document>"#;
    /// let doc = Document::load_body(xml)?;
    /// assert_eq!(doc.render(undocx::RenderFormat::Html)?, "<p>Hello</p>");
    /// # Ok::<(), undocx::Error>(())
    /// ```
    pub fn load_body(xml: &str) -> Result<Self> {
        BodyParser::from_xml(xml).parse()
    }

    /// Load a document body with explicit options, style resolver and attachments.
    pub fn load_body_with(
        xml: &str,
        options: &LoadOptions,
        resolver: &dyn StyleResolver,
        attachments: Attachments,
    ) -> Result<Self> {
        parser::load_document(xml, options, resolver, attachments)
    }

    /// Read and load a `document.xml` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        BodyParser::open(path)?.parse()
    }

    pub(crate) fn from_parts(
        xml: XmlDocument,
        namespaces: Namespaces,
        nodes: Vec<Node>,
        root: Vec<NodeId>,
        attachments: Attachments,
    ) -> Self {
        Self {
            xml,
            namespaces,
            nodes,
            root,
            attachments,
        }
    }

    /// Render the top-level nodes in order.
    pub fn render(&self, format: RenderFormat) -> Result<String> {
        self.render_with_options(&RenderOptions::new().with_format(format))
    }

    /// Render with full options.
    pub fn render_with_options(&self, options: &RenderOptions) -> Result<String> {
        render::render(self, options)
    }

    /// All links when `linkup_id` is `None`, otherwise those with that id.
    pub fn attached_links(&self, linkup_id: Option<&str>) -> Vec<&LinkAttachment> {
        self.attachments.links(linkup_id)
    }

    /// All files when `linkup_id` is `None`, otherwise those with that id.
    pub fn attached_files(&self, linkup_id: Option<&str>) -> Vec<&FileAttachment> {
        self.attachments.files(linkup_id)
    }

    /// First link with the given id.
    pub fn attached_link(&self, linkup_id: &str) -> Option<&LinkAttachment> {
        self.attachments.link(linkup_id)
    }

    /// First file with the given id.
    pub fn attached_file(&self, linkup_id: &str) -> Option<&FileAttachment> {
        self.attachments.file(linkup_id)
    }

    /// Turn arbitrary text into a value usable as an HTML `id`.
    ///
    /// Markup tags are stripped, `&nbsp;` counts as a space, surrounding
    /// whitespace is trimmed, inner spaces become `_`, the result is prefixed
    /// with `docx_` and everything outside `[A-Za-z0-9_]` is removed.
    ///
    /// ```
    /// use undocx::Document;
    ///
    /// assert_eq!(Document::sanitize_html_id(" A&nbsp;B<br>"), "docx_A_B");
    /// assert_eq!(Document::sanitize_html_id(""), "docx_");
    /// ```
    pub fn sanitize_html_id(raw: &str) -> String {
        let stripped = tag_pattern().replace_all(raw, "");
        let spaced = stripped.replace("&nbsp;", " ").replace('\u{a0}', " ");
        let joined = spaced.trim().replace(' ', "_");
        let prefixed = format!("{}{}", HTML_ID_PREFIX, joined);
        invalid_id_pattern().replace_all(&prefixed, "").into_owned()
    }

    /// Get a node from the construction record.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The construction record: every node, including those nested in tables.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Ids of the top-level nodes in source order.
    pub fn root(&self) -> &[NodeId] {
        &self.root
    }

    /// Top-level nodes in source order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root.iter().filter_map(move |&id| self.node(id))
    }

    /// The parsed source XML.
    pub fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    /// Namespace bindings used for queries.
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Attachment registries.
    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    /// Check if the body produced no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Get plain text content of the document.
    pub fn plain_text(&self) -> String {
        render::document_text(self, &RenderOptions::default())
    }

    /// Count the document's content.
    pub fn stats(&self) -> RenderStats {
        let mut stats = RenderStats::new();
        for node in &self.nodes {
            match node.kind() {
                NodeKind::Paragraph => stats.add_paragraph(),
                NodeKind::ListItem => stats.add_list_item(),
                NodeKind::Table => stats.add_table(),
            }
            if let Some(paragraph) = node.as_paragraph() {
                stats.image_count += paragraph.images().count() as u32;
                stats.link_count += paragraph.link_count() as u32;
                stats.count_text(&paragraph.plain_text());
            }
        }
        stats
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*(?:>|$)").expect("valid tag pattern"))
}

fn invalid_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid id pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefaultStyleResolver, FileAttachment, LinkAttachment};
    use crate::Error;

    const BODY: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Intro</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>One</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Two</w:t></w:r></w:p>
    <w:p><w:r><w:t>Outro</w:t></w:r></w:p>
    <w:sectPr/>
  </w:body>
</w:document>"#;

    #[test]
    fn test_sanitize_html_id() {
        assert_eq!(Document::sanitize_html_id(" A&nbsp;B<br>"), "docx_A_B");
        assert_eq!(Document::sanitize_html_id(""), "docx_");
        assert_eq!(Document::sanitize_html_id("<b></b>"), "docx_");
        assert_eq!(Document::sanitize_html_id("Chapter 1: Intro!"), "docx_Chapter_1_Intro");
        assert_eq!(Document::sanitize_html_id("x\u{a0}y"), "docx_x_y");
        assert_eq!(Document::sanitize_html_id("tail<br"), "docx_tail");
    }

    #[test]
    fn test_load_body_root_order() {
        let doc = Document::load_body(BODY).unwrap();
        assert_eq!(doc.root().len(), 4);
        let kinds: Vec<_> = doc.root_nodes().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Paragraph,
                NodeKind::ListItem,
                NodeKind::ListItem,
                NodeKind::Paragraph
            ]
        );
        assert!(doc.root_nodes().all(|n| n.is_from_root()));
    }

    #[test]
    fn test_render_html() {
        let doc = Document::load_body(BODY).unwrap();
        let html = doc.render(RenderFormat::Html).unwrap();
        assert_eq!(
            html,
            "<p>Intro</p><ul><li>One</li><li>Two</li></ul><li><p>Outro</p>"
        );

        let options = LoadOptions::new().with_balanced_list_items(true);
        let balanced =
            Document::load_body_with(BODY, &options, &DefaultStyleResolver, Attachments::new())
                .unwrap();
        assert_eq!(
            balanced.render(RenderFormat::Html).unwrap(),
            "<p>Intro</p><ul><li>One</li><li>Two</li></ul><p>Outro</p>"
        );
    }

    #[test]
    fn test_no_body_element() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;
        assert!(matches!(Document::load_body(xml), Err(Error::NoBodyElement)));
        assert!(matches!(Document::load_body(""), Err(Error::NoBodyElement)));
    }

    #[test]
    fn test_attachment_lookup() {
        let attachments = Attachments::new()
            .with_link(LinkAttachment::new("rId1", "https://example.com"))
            .with_file(FileAttachment::new("rId2", "media/image1.png"));
        let doc = Document::load_body_with(
            BODY,
            &LoadOptions::default(),
            &crate::model::DefaultStyleResolver,
            attachments,
        )
        .unwrap();

        assert_eq!(doc.attached_links(None).len(), 1);
        assert_eq!(doc.attached_files(Some("rId2")).len(), 1);
        assert!(doc.attached_files(Some("rId1")).is_empty());
        assert_eq!(doc.attached_link("rId1").unwrap().target, "https://example.com");
        assert!(doc.attached_file("missing").is_none());
    }

    #[test]
    fn test_stats_and_text() {
        let doc = Document::load_body(BODY).unwrap();
        let stats = doc.stats();
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.table_count, 0);
        assert_eq!(stats.word_count, 4);
        assert_eq!(doc.plain_text(), "Intro\n\n- One\n- Two\n\nOutro");
    }
}
