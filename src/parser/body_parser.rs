//! Document body parser.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Attachments, DefaultStyleResolver, Document, StyleResolver};
use crate::xml::{Namespaces, XmlDocument};

use super::loader::TreeLoader;
use super::options::LoadOptions;

/// Parser for a WordprocessingML main document part (`word/document.xml`).
pub struct BodyParser {
    xml: String,
    options: LoadOptions,
    resolver: Box<dyn StyleResolver>,
    attachments: Attachments,
}

impl BodyParser {
    /// Parse XML text.
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self::from_xml_with_options(xml, LoadOptions::default())
    }

    /// Parse XML text with custom options.
    pub fn from_xml_with_options(xml: impl Into<String>, options: LoadOptions) -> Self {
        Self {
            xml: xml.into(),
            options,
            resolver: Box::new(DefaultStyleResolver),
            attachments: Attachments::new(),
        }
    }

    /// Parse XML from bytes. Invalid UTF-8 is replaced rather than rejected.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_bytes_with_options(data, LoadOptions::default())
    }

    /// Parse XML from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: LoadOptions) -> Self {
        Self::from_xml_with_options(String::from_utf8_lossy(data), options)
    }

    /// Open a `document.xml` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, LoadOptions::default())
    }

    /// Open a `document.xml` file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(Self::from_bytes_with_options(&data, options))
    }

    /// Parse XML from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, LoadOptions::default())
    }

    /// Parse XML from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: LoadOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes_with_options(&data, options))
    }

    /// Replace the load options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a custom style resolver.
    pub fn with_style_resolver(mut self, resolver: impl StyleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub(crate) fn with_boxed_style_resolver(mut self, resolver: Box<dyn StyleResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Attach link and file registries.
    pub fn with_attachments(mut self, attachments: Attachments) -> Self {
        self.attachments = attachments;
        self
    }

    /// Current load options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Parse the body and return a structured Document.
    pub fn parse(&self) -> Result<Document> {
        load_document(
            &self.xml,
            &self.options,
            self.resolver.as_ref(),
            self.attachments.clone(),
        )
    }
}

/// Build a document from the first `w:body` in `xml`.
pub(crate) fn load_document(
    xml: &str,
    options: &LoadOptions,
    resolver: &dyn StyleResolver,
    attachments: Attachments,
) -> Result<Document> {
    let tree = XmlDocument::parse(xml, options.parse_mode)?;
    let ns = Namespaces::wordprocessing();

    let bodies = tree.query(&ns, "w:body");
    let body = match bodies.as_slice() {
        [] => return Err(Error::NoBodyElement),
        [body] => *body,
        [body, ..] => {
            log::warn!("Found {} body elements, using the first", bodies.len());
            *body
        }
    };

    let mut loader = TreeLoader::new(&ns, resolver, options);
    let root = loader.load_children(body, true);
    let nodes = loader.into_nodes();

    log::debug!(
        "Loaded {} top-level nodes ({} total) from {} XML nodes",
        root.len(),
        nodes.len(),
        tree.node_count()
    );

    Ok(Document::from_parts(tree, ns, nodes, root, attachments))
}
