//! Plain text rendering.

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{inline_text, Document, Node, NodeContent, NodeKind, Table, TableCell};

use super::RenderOptions;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(document_text(doc, options))
}

/// Text of the top-level nodes.
///
/// Blocks are separated by blank lines, except consecutive list items which
/// stay on adjacent lines. Empty blocks are dropped.
pub(crate) fn document_text(doc: &Document, options: &RenderOptions) -> String {
    let mut output = String::new();
    let mut previous: Option<NodeKind> = None;

    for node in doc.root_nodes() {
        let block = node_text(doc, node, options);
        if block.trim().is_empty() {
            continue;
        }

        if let Some(previous) = previous {
            let tight = previous == NodeKind::ListItem && node.kind() == NodeKind::ListItem;
            output.push_str(if tight { "\n" } else { "\n\n" });
        }
        output.push_str(&block);
        previous = Some(node.kind());
    }

    output.nfc().collect::<String>().trim().to_string()
}

/// Text of a single node.
pub(crate) fn node_text(doc: &Document, node: &Node, options: &RenderOptions) -> String {
    match node.content() {
        NodeContent::Paragraph(p) if node.kind() == NodeKind::ListItem => {
            let indent = "  ".repeat(node.list_level().saturating_sub(1) as usize);
            format!(
                "{}{} {}",
                indent,
                options.list_marker,
                inline_text(&p.content).trim()
            )
        }
        NodeContent::Paragraph(p) => inline_text(&p.content),
        NodeContent::Table(t) => table_text(doc, t, options),
    }
}

fn table_text(doc: &Document, table: &Table, options: &RenderOptions) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            row.visible_cells()
                .map(|cell| cell_text(doc, cell, options))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cell text on a single line.
fn cell_text(doc: &Document, cell: &TableCell, options: &RenderOptions) -> String {
    cell.content
        .iter()
        .filter_map(|id| doc.node(*id))
        .map(|node| node_text(doc, node, options))
        .flat_map(|text| {
            text.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn load(body: &str) -> Document {
        let xml = format!(r#"<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#, W, body);
        Document::load_body(&xml).unwrap()
    }

    fn item(level: u32, text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            level, text
        )
    }

    #[test]
    fn test_to_text() {
        let doc = load("<w:p><w:r><w:t>Hello, world!</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Second.</w:t></w:r></w:p>");
        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result, "Hello, world!\n\nSecond.");
    }

    #[test]
    fn test_list_indentation() {
        let body = format!("{}{}{}", item(0, "a"), item(1, "b"), item(0, "c"));
        let doc = load(&body);
        let options = RenderOptions::default().with_list_marker('*');
        assert_eq!(to_text(&doc, &options).unwrap(), "* a\n  * b\n* c");
    }

    #[test]
    fn test_table_rows() {
        let doc = load(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc></w:tr>\
             <w:tr><w:tc><w:p><w:r><w:t>d</w:t></w:r></w:p></w:tc><w:tc/></w:tr></w:tbl>",
        );
        // The empty trailing cell is trimmed away with the rest of the output
        assert_eq!(doc.plain_text(), "a\tb c\nd");
    }

    #[test]
    fn test_nfc_normalization() {
        let doc = load("<w:p><w:r><w:t>Cafe\u{301}</w:t></w:r></w:p>");
        assert_eq!(doc.plain_text(), "Caf\u{e9}");
    }
}
