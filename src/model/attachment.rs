//! Linked attachments (hyperlinks and embedded files).
//!
//! Content nodes refer to attachments through an opaque linkup id (the
//! relationship id in the source). Extracting attachments from the package is
//! left to the caller; the document only owns and looks them up.

use serde::{Deserialize, Serialize};

/// A hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttachment {
    /// Linkup id referenced from `w:hyperlink/@r:id`
    pub linkup_id: String,

    /// Link target (URL or package-relative path)
    pub target: String,
}

impl LinkAttachment {
    pub fn new(linkup_id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            linkup_id: linkup_id.into(),
            target: target.into(),
        }
    }
}

/// An embedded file, usually an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Linkup id referenced from `a:blip/@r:embed` or `v:imagedata/@r:id`
    pub linkup_id: String,

    /// Output path of the file, relative to the rendered document
    pub path: String,
}

impl FileAttachment {
    pub fn new(linkup_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            linkup_id: linkup_id.into(),
            path: path.into(),
        }
    }
}

/// Registries of link and file attachments.
///
/// Linkup ids are not unique; lookups return matches in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachments {
    /// Hyperlink targets
    pub links: Vec<LinkAttachment>,

    /// Embedded files
    pub files: Vec<FileAttachment>,
}

impl Attachments {
    /// Create empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link.
    pub fn add_link(&mut self, link: LinkAttachment) {
        self.links.push(link);
    }

    /// Register a file.
    pub fn add_file(&mut self, file: FileAttachment) {
        self.files.push(file);
    }

    /// Builder form of [`Attachments::add_link`].
    pub fn with_link(mut self, link: LinkAttachment) -> Self {
        self.add_link(link);
        self
    }

    /// Builder form of [`Attachments::add_file`].
    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.add_file(file);
        self
    }

    /// All links when `linkup_id` is `None`, otherwise the matching ones.
    pub fn links(&self, linkup_id: Option<&str>) -> Vec<&LinkAttachment> {
        self.links
            .iter()
            .filter(|l| linkup_id.map_or(true, |id| l.linkup_id == id))
            .collect()
    }

    /// All files when `linkup_id` is `None`, otherwise the matching ones.
    pub fn files(&self, linkup_id: Option<&str>) -> Vec<&FileAttachment> {
        self.files
            .iter()
            .filter(|f| linkup_id.map_or(true, |id| f.linkup_id == id))
            .collect()
    }

    /// First link with the given id.
    pub fn link(&self, linkup_id: &str) -> Option<&LinkAttachment> {
        self.links.iter().find(|l| l.linkup_id == linkup_id)
    }

    /// First file with the given id.
    pub fn file(&self, linkup_id: &str) -> Option<&FileAttachment> {
        self.files.iter().find(|f| f.linkup_id == linkup_id)
    }

    /// Check if both registries are empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.files.is_empty()
    }
}
