//! Document model types.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. The top-level sequence and table cells refer to nodes by id,
//! which keeps the list post-processing pass free of shared mutable state.

mod attachment;
mod document;
mod node;
mod paragraph;
mod style;
mod table;

pub use attachment::{Attachments, FileAttachment, LinkAttachment};
pub use document::{Document, HTML_ID_PREFIX};
pub use node::{Node, NodeContent, NodeId, NodeKind};
pub(crate) use paragraph::inline_text;
pub use paragraph::{
    Alignment, Inline, LinkTarget, Numbering, MAX_ILVL, Paragraph, ParagraphProperties, TextRun, TextStyle,
};
pub(crate) use style::class_attribute;
pub use style::{DefaultStyleResolver, StyleDescriptor, StyleResolver, StyleSheet};
pub use table::{Table, TableCell, TableRow};
