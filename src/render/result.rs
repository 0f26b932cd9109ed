//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Document statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts of a document's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of plain paragraphs (list items excluded)
    pub paragraph_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of tables, nested ones included
    pub table_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of hyperlinks
    pub link_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.link_count += other.link_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_merge() {
        let mut first = RenderStats {
            paragraph_count: 5,
            table_count: 2,
            ..Default::default()
        };
        let second = RenderStats {
            paragraph_count: 3,
            list_item_count: 4,
            link_count: 1,
            ..Default::default()
        };

        first.merge(&second);

        assert_eq!(first.paragraph_count, 8);
        assert_eq!(first.table_count, 2);
        assert_eq!(first.list_item_count, 4);
        assert_eq!(first.link_count, 1);
    }
}
