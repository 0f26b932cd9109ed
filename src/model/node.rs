//! Document nodes.

use serde::{Deserialize, Serialize};

use super::{Document, Paragraph, StyleDescriptor, Table};
use crate::error::Result;
use crate::render::{self, RenderFormat, RenderOptions};

/// Index of a node in the document's construction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in [`Document::nodes`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// Display classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Ordinary paragraph
    Paragraph,
    /// Table
    Table,
    /// Paragraph that belongs to a list
    ListItem,
}

/// Content owned by a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    /// Paragraph content
    Paragraph(Paragraph),
    /// Table content
    Table(Table),
}

/// A block-level element of the document.
///
/// Besides its content a node carries markup fragments that the renderers
/// emit immediately before and after it. List nesting is expressed entirely
/// through these fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,
    list_level: u32,
    style: Option<StyleDescriptor>,
    prepend: Vec<String>,
    append: Vec<String>,
    from_root: bool,
    content: NodeContent,
}

impl Node {
    /// Create a paragraph node. The list level comes from its numbering.
    pub fn paragraph(paragraph: Paragraph, style: Option<StyleDescriptor>) -> Self {
        let list_level = paragraph.list_level();
        Self {
            kind: NodeKind::Paragraph,
            list_level,
            style,
            prepend: Vec::new(),
            append: Vec::new(),
            from_root: false,
            content: NodeContent::Paragraph(paragraph),
        }
    }

    /// Create a table node.
    pub fn table(table: Table, style: Option<StyleDescriptor>) -> Self {
        Self {
            kind: NodeKind::Table,
            list_level: 0,
            style,
            prepend: Vec::new(),
            append: Vec::new(),
            from_root: false,
            content: NodeContent::Table(table),
        }
    }

    /// Current classification.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Reclassify the node.
    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    /// List nesting level (0 = not in a list).
    pub fn list_level(&self) -> u32 {
        self.list_level
    }

    /// Resolved style.
    pub fn style(&self) -> Option<&StyleDescriptor> {
        self.style.as_ref()
    }

    /// Add a fragment to emit before the node.
    pub fn prepend_additional(&mut self, fragment: impl Into<String>) {
        self.prepend.push(fragment.into());
    }

    /// Add a fragment to emit after the node.
    pub fn append_additional(&mut self, fragment: impl Into<String>) {
        self.append.push(fragment.into());
    }

    /// Fragments emitted before the node, in order.
    pub fn prepend_fragments(&self) -> &[String] {
        &self.prepend
    }

    /// Fragments emitted after the node, in order.
    pub fn append_fragments(&self) -> &[String] {
        &self.append
    }

    /// Whether the node is an immediate child of the body.
    pub fn is_from_root(&self) -> bool {
        self.from_root
    }

    pub(crate) fn set_from_root(&mut self, from_root: bool) {
        self.from_root = from_root;
    }

    /// Node content.
    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// Paragraph content, if this is a paragraph or list item.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match &self.content {
            NodeContent::Paragraph(p) => Some(p),
            NodeContent::Table(_) => None,
        }
    }

    /// Table content, if this is a table.
    pub fn as_table(&self) -> Option<&Table> {
        match &self.content {
            NodeContent::Table(t) => Some(t),
            NodeContent::Paragraph(_) => None,
        }
    }

    /// Check if this node is a list item.
    pub fn is_list_item(&self) -> bool {
        self.kind == NodeKind::ListItem
    }

    /// Render this node alone, fragments included.
    ///
    /// `document` is needed to reach nested nodes and attachments.
    pub fn render(&self, format: RenderFormat, document: &Document) -> Result<String> {
        render::render_node(self, document, &RenderOptions::new().with_format(format))
    }
}
