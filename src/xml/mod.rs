//! Navigable XML tree for WordprocessingML sources.
//!
//! The tree is an arena: every element and text node lives in one `Vec` and is
//! addressed by [`XmlNodeId`]. [`ElementRef`] is a cheap copyable handle used for
//! navigation. Element and attribute names keep the prefix written in the source,
//! and each also records the namespace URI it resolved to, so queries made through
//! [`Namespaces`] work regardless of the prefixes the producer chose.

mod namespaces;
mod parser;

pub use namespaces::{
    split_qname, Namespaces, A_NS, MC_NS, PIC_NS, R_NS, V_NS, WP_NS, W_NS,
};
pub use parser::ParseMode;

/// Index of a node inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XmlNodeId(usize);

/// An attribute with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written
    pub name: String,
    /// Namespace URI for prefixed attributes
    pub namespace: Option<String>,
    /// Unescaped value
    pub value: String,
}

#[derive(Debug, Clone)]
struct ElementData {
    name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<XmlNodeId>,
    parent: Option<XmlNodeId>,
}

#[derive(Debug, Clone)]
enum XmlNode {
    Element(ElementData),
    Text(String),
}

/// A parsed XML document.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
    roots: Vec<XmlNodeId>,
}

impl XmlDocument {
    /// Parse XML text into a tree.
    pub fn parse(text: &str, mode: ParseMode) -> crate::Result<Self> {
        parser::parse(text, mode)
    }

    /// Top-level elements (normally exactly one).
    pub fn root_elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.roots.iter().filter_map(move |&id| self.element(id))
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<ElementRef<'_>> {
        self.root_elements().next()
    }

    /// Get an element handle by id, `None` for text nodes.
    pub fn element(&self, id: XmlNodeId) -> Option<ElementRef<'_>> {
        match self.nodes.get(id.0) {
            Some(XmlNode::Element(_)) => Some(ElementRef { doc: self, id }),
            _ => None,
        }
    }

    /// All elements matching `qname`, in document order (the `//prefix:name` query).
    pub fn query<'a>(&'a self, ns: &Namespaces, qname: &str) -> Vec<ElementRef<'a>> {
        self.root_elements()
            .flat_map(|root| std::iter::once(root).chain(root.descendants()))
            .filter(|el| el.is(ns, qname))
            .collect()
    }

    /// Total number of nodes (elements and text).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn data(&self, id: XmlNodeId) -> &ElementData {
        match &self.nodes[id.0] {
            XmlNode::Element(data) => data,
            XmlNode::Text(_) => unreachable!("ElementRef always points at an element"),
        }
    }

    fn push(&mut self, node: XmlNode, parent: Option<XmlNodeId>) -> XmlNodeId {
        let id = XmlNodeId(self.nodes.len());
        self.nodes.push(node);
        match parent {
            Some(parent) => {
                if let XmlNode::Element(data) = &mut self.nodes[parent.0] {
                    data.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }
}

/// Handle to an element inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a XmlDocument,
    id: XmlNodeId,
}

impl<'a> ElementRef<'a> {
    /// Arena id of this element.
    pub fn id(&self) -> XmlNodeId {
        self.id
    }

    /// Qualified name as written in the source.
    pub fn name(&self) -> &'a str {
        &self.doc.data(self.id).name
    }

    /// Name without its prefix.
    pub fn local_name(&self) -> &'a str {
        split_qname(self.name()).1
    }

    /// Resolved namespace URI.
    pub fn namespace(&self) -> Option<&'a str> {
        self.doc.data(self.id).namespace.as_deref()
    }

    /// Check the element against a prefixed query name such as `w:p`.
    pub fn is(&self, ns: &Namespaces, qname: &str) -> bool {
        ns.matches(qname, self.name(), self.namespace())
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> &'a [Attribute] {
        &self.doc.data(self.id).attributes
    }

    /// Attribute value by prefixed query name, e.g. `w:val`.
    pub fn attr(&self, ns: &Namespaces, qname: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| ns.matches(qname, &a.name, a.namespace.as_deref()))
            .map(|a| a.value.as_str())
    }

    /// Attribute value by literal name.
    pub fn raw_attr(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Parent element.
    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.doc
            .data(self.id)
            .parent
            .and_then(|id| self.doc.element(id))
    }

    /// Child elements in order; text nodes are skipped.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id)
            .children
            .iter()
            .filter_map(move |&id| doc.element(id))
    }

    /// First child element matching `qname`.
    pub fn child(&self, ns: &Namespaces, qname: &str) -> Option<ElementRef<'a>> {
        self.children().find(|c| c.is(ns, qname))
    }

    /// Follow a path of child names, e.g. `["w:pPr", "w:numPr", "w:ilvl"]`.
    pub fn path(&self, ns: &Namespaces, path: &[&str]) -> Option<ElementRef<'a>> {
        path.iter()
            .try_fold(*self, |current, qname| current.child(ns, qname))
    }

    /// Descendant elements in pre-order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<XmlNodeId> = self.doc.data(self.id).children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self.doc, self.id, &mut out);
        out
    }
}

fn collect_text(doc: &XmlDocument, id: XmlNodeId, out: &mut String) {
    match &doc.nodes[id.0] {
        XmlNode::Text(text) => out.push_str(text),
        XmlNode::Element(data) => {
            for &child in &data.children {
                collect_text(doc, child, out);
            }
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    doc: &'a XmlDocument,
    stack: Vec<XmlNodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let XmlNode::Element(data) = &self.doc.nodes[id.0] {
                self.stack.extend(data.children.iter().rev());
                return Some(ElementRef { doc: self.doc, id });
            }
        }
        None
    }
}
