//! Tree loading.

use crate::model::{Node, NodeId, NodeKind, StyleResolver};
use crate::xml::{ElementRef, Namespaces};

use super::classify::{classify, Classified, ElementKind};
use super::list::{apply_list_markup, list_entries, process_list_levels};
use super::options::LoadOptions;
use super::{paragraph, table};

/// Walks one level of siblings at a time and records every constructed node.
///
/// Nested content (table cells) re-enters [`TreeLoader::load_children`] from
/// the variant constructors, so the construction record holds nodes at every
/// depth while each call only returns its own sibling sequence.
pub(crate) struct TreeLoader<'a> {
    ns: &'a Namespaces,
    resolver: &'a dyn StyleResolver,
    options: &'a LoadOptions,
    nodes: Vec<Node>,
}

impl<'a> TreeLoader<'a> {
    pub(crate) fn new(
        ns: &'a Namespaces,
        resolver: &'a dyn StyleResolver,
        options: &'a LoadOptions,
    ) -> Self {
        Self {
            ns,
            resolver,
            options,
            nodes: Vec::new(),
        }
    }

    pub(crate) fn namespaces(&self) -> &'a Namespaces {
        self.ns
    }

    /// Construct nodes for the element children of `parent`, then reconstruct
    /// list nesting across them.
    pub(crate) fn load_children(&mut self, parent: ElementRef<'_>, is_root: bool) -> Vec<NodeId> {
        let mut ids = Vec::new();

        for child in parent.children() {
            let kind = match classify(child, self.ns) {
                Classified::Node(kind) => kind,
                Classified::Skip => {
                    log::debug!("Skipping <{}> under <{}>", child.name(), parent.name());
                    continue;
                }
            };

            let mut node = match kind {
                ElementKind::Paragraph => {
                    let paragraph = paragraph::read_paragraph(child, self.ns);
                    let style = self
                        .resolver
                        .resolve(NodeKind::Paragraph, paragraph.properties.style_id.as_deref());
                    Node::paragraph(paragraph, style)
                }
                ElementKind::Table => {
                    let table = table::read_table(self, child);
                    let style = self
                        .resolver
                        .resolve(NodeKind::Table, table.style_id.as_deref());
                    Node::table(table, style)
                }
            };
            node.set_from_root(is_root);

            let id = self.attach(node);
            log::trace!(
                "Constructed {:?} #{} from <{}> (level {})",
                kind,
                id.index(),
                child.name(),
                self.nodes[id.index()].list_level()
            );
            ids.push(id);
        }

        let entries = list_entries(&self.nodes, &ids);
        let markup = process_list_levels(&entries, self.options);
        apply_list_markup(&mut self.nodes, &ids, markup);

        ids
    }

    /// Append a node to the construction record.
    fn attach(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
