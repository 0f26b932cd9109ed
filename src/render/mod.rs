//! Rendering module for converting documents to various output formats.

mod html;
mod json;
mod options;
mod result;
mod text;

pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{RenderFormat, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;

pub(crate) use text::document_text;

use crate::error::{Error, Result};
use crate::model::{Document, Node};

/// Render a document in the format selected by `options`.
pub fn render(doc: &Document, options: &RenderOptions) -> Result<String> {
    match options.format {
        RenderFormat::Html => to_html(doc, options),
        RenderFormat::Text => to_text(doc, options),
        RenderFormat::Json => to_json(doc, options.json_format),
    }
}

/// Render a document together with its statistics.
pub fn render_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let content = render(doc, options)?;
    Ok(RenderResult::new(content, doc.stats()))
}

/// Render a single node, fragments included.
pub fn render_node(node: &Node, doc: &Document, options: &RenderOptions) -> Result<String> {
    match options.format {
        RenderFormat::Html => {
            let mut output = String::new();
            HtmlRenderer::new(doc, options).render_node(&mut output, node);
            Ok(output)
        }
        RenderFormat::Text => Ok(text::node_text(doc, node, options)),
        RenderFormat::Json => {
            let result = match options.json_format {
                JsonFormat::Pretty => serde_json::to_string_pretty(node),
                JsonFormat::Compact => serde_json::to_string(node),
            };
            result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>One two</w:t></w:r></w:p>
<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>three</w:t></w:r></w:p>
</w:body></w:document>"#;

    #[test]
    fn test_render_dispatch() {
        let doc = Document::load_body(XML).unwrap();

        let html = render(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(html, "<p>One two</p><ul><li>three");

        let text = render(&doc, &RenderOptions::new().with_format(RenderFormat::Text)).unwrap();
        assert_eq!(text, "One two\n\n- three");
    }

    #[test]
    fn test_render_node_includes_fragments() {
        let doc = Document::load_body(XML).unwrap();
        let item = doc.root_nodes().nth(1).unwrap();

        assert_eq!(item.render(RenderFormat::Html, &doc).unwrap(), "<ul><li>three");
        assert_eq!(item.render(RenderFormat::Text, &doc).unwrap(), "- three");
        assert!(item
            .render(RenderFormat::Json, &doc)
            .unwrap()
            .contains("\"list_item\""));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = Document::load_body(XML).unwrap();
        let result = render_with_stats(&doc, &RenderOptions::new()).unwrap();

        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.list_item_count, 1);
        assert_eq!(result.stats.word_count, 3);
        assert_eq!(result.content_len(), result.content.len());
    }
}
