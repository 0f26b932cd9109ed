//! HTML rendering.
//!
//! Every node renders as its prepend fragments, its own markup, then its
//! append fragments. List items render inline content only; their `<ul>` and
//! `<li>` tags come entirely from the fragments.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::Result;
use crate::model::{
    Document, Inline, LinkTarget, Node, NodeContent, NodeKind, Paragraph, Table, TableCell,
    TableRow, TextStyle,
};

use super::RenderOptions;

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(HtmlRenderer::new(doc, options).render())
}

/// HTML renderer.
pub struct HtmlRenderer<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a renderer over `doc`.
    pub fn new(doc: &'a Document, options: &'a RenderOptions) -> Self {
        Self { doc, options }
    }

    /// Render the top-level nodes in order.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for node in self.doc.root_nodes() {
            self.render_node(&mut output, node);
        }
        output
    }

    /// Render one node, fragments included.
    pub fn render_node(&self, output: &mut String, node: &Node) {
        for fragment in node.prepend_fragments() {
            output.push_str(fragment);
        }

        match node.content() {
            NodeContent::Paragraph(p) if node.kind() == NodeKind::ListItem => {
                self.render_inlines(output, &p.content);
            }
            NodeContent::Paragraph(p) => self.render_paragraph(output, node, p),
            NodeContent::Table(t) => self.render_table(output, node, t),
        }

        for fragment in node.append_fragments() {
            output.push_str(fragment);
        }
    }

    fn render_paragraph(&self, output: &mut String, node: &Node, para: &Paragraph) {
        let tag = match node.style().and_then(|s| s.heading_level) {
            Some(level) => format!("h{}", level),
            None => "p".to_string(),
        };
        let class = node.style().map(|s| s.class_attribute()).unwrap_or_default();

        let mut css = Vec::new();
        if let Some(align) = para.properties.alignment.css() {
            css.push(format!("text-align:{}", align));
        }
        if let Some(indent) = para.properties.indent_left_pt.filter(|&pt| pt != 0) {
            css.push(format!("margin-left:{}pt", indent));
        }

        output.push('<');
        output.push_str(&tag);
        output.push_str(&class);
        push_style(output, &css);
        output.push('>');
        self.render_inlines(output, &para.content);
        output.push_str("</");
        output.push_str(&tag);
        output.push('>');
    }

    fn render_table(&self, output: &mut String, node: &Node, table: &Table) {
        let class = node.style().map(|s| s.class_attribute()).unwrap_or_default();
        output.push_str("<table");
        output.push_str(&class);
        output.push('>');
        for row in &table.rows {
            self.render_row(output, row);
        }
        output.push_str("</table>");
    }

    fn render_row(&self, output: &mut String, row: &TableRow) {
        let tag = if row.is_header { "th" } else { "td" };

        output.push_str("<tr>");
        for cell in row.visible_cells() {
            output.push('<');
            output.push_str(tag);
            push_cell_attributes(output, cell);
            output.push('>');
            for id in &cell.content {
                if let Some(child) = self.doc.node(*id) {
                    self.render_node(output, child);
                }
            }
            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        output.push_str("</tr>");
    }

    fn render_inlines(&self, output: &mut String, content: &[Inline]) {
        for inline in content {
            self.render_inline(output, inline);
        }
    }

    fn render_inline(&self, output: &mut String, inline: &Inline) {
        match inline {
            Inline::Text(run) => push_styled(output, &encode_text(&run.text), &run.style),
            Inline::LineBreak => output.push_str("<br />"),
            Inline::Tab => output.push(' '),
            Inline::Link { target, content } => self.render_link(output, target, content),
            Inline::Image {
                linkup_id,
                alt_text,
                width_pt,
                height_pt,
            } => self.render_image(output, linkup_id, alt_text.as_deref(), *width_pt, *height_pt),
            Inline::Bookmark { name } => {
                output.push_str("<a id=\"");
                output.push_str(&Document::sanitize_html_id(name));
                output.push_str("\"></a>");
            }
        }
    }

    fn render_link(&self, output: &mut String, target: &LinkTarget, content: &[Inline]) {
        let href = match target {
            LinkTarget::Relationship(id) => match self.doc.attached_link(id) {
                Some(link) => encode_double_quoted_attribute(&link.target).into_owned(),
                None => {
                    log::debug!("No link attachment for {}", id);
                    return self.render_inlines(output, content);
                }
            },
            LinkTarget::Anchor(name) => format!("#{}", Document::sanitize_html_id(name)),
        };

        output.push_str("<a href=\"");
        output.push_str(&href);
        output.push_str("\">");
        self.render_inlines(output, content);
        output.push_str("</a>");
    }

    fn render_image(
        &self,
        output: &mut String,
        linkup_id: &str,
        alt_text: Option<&str>,
        width_pt: Option<i64>,
        height_pt: Option<i64>,
    ) {
        if !self.options.include_images {
            return;
        }
        let Some(file) = self.doc.attached_file(linkup_id) else {
            log::debug!("No file attachment for image {}", linkup_id);
            return;
        };

        let src = format!("{}{}", self.options.image_path_prefix, file.path);
        let mut css = Vec::new();
        if let Some(width) = width_pt {
            css.push(format!("width:{}pt", width));
        }
        if let Some(height) = height_pt {
            css.push(format!("height:{}pt", height));
        }

        output.push_str("<img src=\"");
        output.push_str(&encode_double_quoted_attribute(&src));
        output.push_str("\" alt=\"");
        output.push_str(&encode_double_quoted_attribute(alt_text.unwrap_or_default()));
        output.push('"');
        push_style(output, &css);
        output.push_str(" />");
    }
}

fn push_style(output: &mut String, css: &[String]) {
    if !css.is_empty() {
        output.push_str(" style=\"");
        output.push_str(&css.join(";"));
        output.push('"');
    }
}

fn push_cell_attributes(output: &mut String, cell: &TableCell) {
    if cell.colspan > 1 {
        output.push_str(&format!(" colspan=\"{}\"", cell.colspan));
    }
    if cell.rowspan > 1 {
        output.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
    }
    if let Some(width) = cell.width_pt {
        output.push_str(&format!(" style=\"width:{}pt\"", width));
    }
}

/// Wrap already-escaped text in the tags of `style`.
fn push_styled(output: &mut String, escaped: &str, style: &TextStyle) {
    let tags: Vec<&str> = [
        (style.bold, "strong"),
        (style.italic, "em"),
        (style.underline, "u"),
        (style.strikethrough, "s"),
        (style.superscript, "sup"),
        (style.subscript, "sub"),
    ]
    .into_iter()
    .filter_map(|(on, tag)| on.then_some(tag))
    .collect();

    for tag in &tags {
        output.push('<');
        output.push_str(tag);
        output.push('>');
    }
    output.push_str(escaped);
    for tag in tags.iter().rev() {
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }
}
