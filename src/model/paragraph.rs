//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of inline content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in source order
    pub content: Vec<Inline>,

    /// Paragraph properties
    pub properties: ParagraphProperties,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Add a styled text run, merging it into the previous run when the
    /// styles match.
    pub fn add_run(&mut self, run: TextRun) {
        push_run(&mut self.content, run);
    }

    /// Add any inline element.
    pub fn add_inline(&mut self, inline: Inline) {
        match inline {
            Inline::Text(run) => self.add_run(run),
            other => self.content.push(other),
        }
    }

    /// List nesting level: `ilvl + 1` for numbered paragraphs, otherwise 0.
    ///
    /// Never exceeds `MAX_ILVL + 1`.
    pub fn list_level(&self) -> u32 {
        self.properties
            .numbering
            .as_ref()
            .filter(|n| n.num_id != 0)
            .map_or(0, |n| n.ilvl.min(MAX_ILVL) + 1)
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        inline_text(&self.content)
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Iterate over images, including those inside links.
    pub fn images(&self) -> impl Iterator<Item = &Inline> {
        self.content.iter().flat_map(|inline| match inline {
            Inline::Link { content, .. } => content.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .filter(|inline| matches!(inline, Inline::Image { .. }))
    }

    /// Count links in the paragraph.
    pub fn link_count(&self) -> usize {
        self.content
            .iter()
            .filter(|inline| matches!(inline, Inline::Link { .. }))
            .count()
    }
}

fn push_run(content: &mut Vec<Inline>, run: TextRun) {
    if run.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = content.last_mut() {
        if last.style == run.style {
            last.text.push_str(&run.text);
            return;
        }
    }
    content.push(Inline::Text(run));
}

/// Plain text of a sequence of inlines.
pub(crate) fn inline_text(content: &[Inline]) -> String {
    content
        .iter()
        .map(|c| match c {
            Inline::Text(run) => run.text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::Tab => "\t".to_string(),
            Inline::Link { content, .. } => inline_text(content),
            Inline::Image { alt_text, .. } => alt_text.clone().unwrap_or_default(),
            Inline::Bookmark { .. } => String::new(),
        })
        .collect()
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A text run with styling
    Text(TextRun),

    /// A line break
    LineBreak,

    /// A tab character
    Tab,

    /// A hyperlink
    Link {
        /// Where the link points
        target: LinkTarget,
        /// Link content
        content: Vec<Inline>,
    },

    /// An inline image
    Image {
        /// Linkup id of the embedded file
        linkup_id: String,
        /// Alternative text
        alt_text: Option<String>,
        /// Display width in points
        width_pt: Option<i64>,
        /// Display height in points
        height_pt: Option<i64>,
    },

    /// A bookmark anchor
    Bookmark {
        /// Bookmark name
        name: String,
    },
}

impl Inline {
    /// Build a link inline, merging adjacent runs of its content.
    pub fn link(target: LinkTarget, content: Vec<Inline>) -> Self {
        let mut merged = Vec::with_capacity(content.len());
        for inline in content {
            match inline {
                Inline::Text(run) => push_run(&mut merged, run),
                other => merged.push(other),
            }
        }
        Inline::Link {
            target,
            content: merged,
        }
    }
}

/// Target of a hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LinkTarget {
    /// A link attachment, by linkup id
    Relationship(String),
    /// A bookmark inside the document
    Anchor(String),
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Superscript
    pub superscript: bool,

    /// Subscript
    pub subscript: bool,
}

/// Paragraph properties read from `w:pPr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    /// Style id (`w:pStyle`)
    pub style_id: Option<String>,

    /// Text alignment (`w:jc`)
    pub alignment: Alignment,

    /// Numbering reference (`w:numPr`)
    pub numbering: Option<Numbering>,

    /// Left indentation in points (`w:ind/@w:left`)
    pub indent_left_pt: Option<i64>,
}

/// Deepest zero-based list level WordprocessingML defines.
pub const MAX_ILVL: u32 = 8;

/// Numbering reference of a list paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Numbering {
    /// Numbering definition id; 0 removes numbering
    pub num_id: u32,

    /// Zero-based indentation level
    pub ilvl: u32,
}

impl Numbering {
    /// Create a numbering reference. `ilvl` is clamped to [`MAX_ILVL`].
    pub fn new(num_id: u32, ilvl: u32) -> Self {
        Self {
            num_id,
            ilvl: ilvl.min(MAX_ILVL),
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse a `w:jc/@w:val` value.
    pub fn from_jc(value: &str) -> Self {
        match value {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "distribute" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }

    /// CSS `text-align` value, `None` for the default.
    pub fn css(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::Justify => Some("justify"),
        }
    }
}
