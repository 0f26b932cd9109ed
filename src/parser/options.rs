//! Loading options and configuration.

use crate::xml::ParseMode;

/// Options for loading a document body.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// How malformed XML is treated
    pub parse_mode: ParseMode,

    /// Close lists still open after the last node of a sibling sequence.
    ///
    /// Off by default, which leaves a trailing list unclosed so output stays
    /// byte-compatible with renderers that close it in an enclosing context.
    pub close_trailing_lists: bool,

    /// Skip the `<li>` opening on a level-0 node that follows a list.
    ///
    /// Off by default: a paragraph or table right after a list is prepended
    /// with `<li>` like any other node continuing at a non-zero level.
    pub balanced_list_items: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse mode.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Reject malformed XML instead of recovering.
    pub fn strict(mut self) -> Self {
        self.parse_mode = ParseMode::Strict;
        self
    }

    /// Recover from malformed XML (the default).
    pub fn permissive(mut self) -> Self {
        self.parse_mode = ParseMode::Permissive;
        self
    }

    /// Enable or disable closing of trailing lists.
    pub fn with_close_trailing_lists(mut self, close: bool) -> Self {
        self.close_trailing_lists = close;
        self
    }

    /// Enable or disable the `<li>` opening on level-0 nodes after a list.
    pub fn with_balanced_list_items(mut self, balanced: bool) -> Self {
        self.balanced_list_items = balanced;
        self
    }
}
