//! List reconstruction.
//!
//! Source paragraphs only carry a numeric list level. This pass turns level
//! transitions between consecutive siblings into `<ul>`/`<li>` fragments:
//! openings are prepended to the node that enters a deeper level, closings are
//! appended to the node just before a shallower one.
//!
//! The pass is split from the node arena: [`process_list_levels`] is a pure
//! fold over `(level, class)` pairs, and [`apply_list_markup`] writes its
//! result into the nodes.

use crate::model::{class_attribute, Node, NodeId, NodeKind};

use super::options::LoadOptions;

/// Closes one list level.
pub const CLOSE_LEVEL: &str = "</li></ul>";
/// Closes a list item before a sibling at the same level.
pub const CLOSE_ITEM: &str = "</li>";

/// Input to the list pass for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// List level (0 = not in a list)
    pub level: u32,
    /// Display class of the node's style, possibly empty
    pub class: String,
}

impl ListEntry {
    /// Create an entry.
    pub fn new(level: u32, class: impl Into<String>) -> Self {
        Self {
            level,
            class: class.into(),
        }
    }

    /// Create an entry without a class.
    pub fn level(level: u32) -> Self {
        Self::new(level, "")
    }
}

/// Output of the list pass for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMarkup {
    /// Reclassify the node as a list item
    pub list_item: bool,
    /// Fragments to prepend, in order
    pub prepend: Vec<String>,
    /// Fragments to append, in order
    pub append: Vec<String>,
}

struct ListState {
    level: u32,
    previous: Option<usize>,
    markup: Vec<ListMarkup>,
}

impl ListState {
    fn append_to_previous(&mut self, fragment: &str) {
        // A transition down from a positive level always has a predecessor
        if let Some(previous) = self.previous {
            self.markup[previous].append.push(fragment.to_string());
        }
    }
}

/// Compute list markup for a sibling sequence.
///
/// A node that leaves a list without opening one still gets `<li>`, even at
/// level 0, unless `balanced_list_items` is set. A list still open after the
/// last entry is left open unless `close_trailing_lists` is set.
pub fn process_list_levels(entries: &[ListEntry], options: &LoadOptions) -> Vec<ListMarkup> {
    let initial = ListState {
        level: 0,
        previous: None,
        markup: vec![ListMarkup::default(); entries.len()],
    };

    let mut state = entries
        .iter()
        .enumerate()
        .fold(initial, |mut state, (index, entry)| {
            let class = class_attribute(&entry.class);
            state.markup[index].list_item = entry.level > 0;

            if state.level > entry.level {
                for _ in entry.level..state.level {
                    state.append_to_previous(CLOSE_LEVEL);
                }
            } else if state.level > 0 && state.level == entry.level {
                state.append_to_previous(CLOSE_ITEM);
            }

            if state.level < entry.level {
                let prepend = &mut state.markup[index].prepend;
                for opened in state.level + 1..=entry.level {
                    // Only the innermost item carries the class
                    let attr = if opened == entry.level { class.as_str() } else { "" };
                    prepend.push(format!("<ul><li{}>", attr));
                }
            } else if state.level > 0 && (entry.level > 0 || !options.balanced_list_items) {
                state.markup[index].prepend.push(format!("<li{}>", class));
            }

            state.level = entry.level;
            state.previous = Some(index);
            state
        });

    if options.close_trailing_lists {
        for _ in 0..state.level {
            state.append_to_previous(CLOSE_LEVEL);
        }
    }

    state.markup
}

/// Write list markup into the nodes of a sibling sequence.
pub fn apply_list_markup(nodes: &mut [Node], ids: &[NodeId], markup: Vec<ListMarkup>) {
    for (&id, markup) in ids.iter().zip(markup) {
        let node = &mut nodes[id.index()];
        if markup.list_item {
            node.set_kind(NodeKind::ListItem);
        }
        for fragment in markup.prepend {
            node.prepend_additional(fragment);
        }
        for fragment in markup.append {
            node.append_additional(fragment);
        }
    }
}

/// Gather list entries for a sibling sequence.
pub fn list_entries(nodes: &[Node], ids: &[NodeId]) -> Vec<ListEntry> {
    ids.iter()
        .map(|id| {
            let node = &nodes[id.index()];
            let class = node.style().map(|s| s.html_class()).unwrap_or_default();
            ListEntry::new(node.list_level(), class)
        })
        .collect()
}
