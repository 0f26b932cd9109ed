//! Integration tests for document loading and rendering.

use std::fs;

use undocx::parser::{classify_tag, Classified, ElementKind};
use undocx::{
    twips_to_points, Attachments, BodyParser, Document, Error, FileAttachment, LinkAttachment,
    LoadOptions, NodeKind, RenderFormat, RenderOptions, StyleSheet, Undocx,
};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
            xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
            xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Quarterly Report</w:t></w:r></w:p>
    <w:p>
      <w:r><w:t xml:space="preserve">See </w:t></w:r>
      <w:hyperlink r:id="rId10"><w:r><w:rPr><w:u w:val="single"/></w:rPr><w:t>the site</w:t></w:r></w:hyperlink>
      <w:r><w:t>.</w:t></w:r>
    </w:p>
    <w:p><w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Revenue</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Domestic</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Costs</w:t></w:r></w:p>
    <w:bookmarkStart w:id="0" w:name="stray"/>
    <w:tbl>
      <w:tblGrid><w:gridCol w:w="2400"/><w:gridCol w:w="2400"/></w:tblGrid>
      <w:tr><w:tc><w:p><w:r><w:t>Q1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:drawing><wp:inline>
        <wp:extent cx="635000" cy="635000"/><wp:docPr id="1" name="Chart" descr="Chart"/>
        <a:graphic><a:graphicData><a:blip r:embed="rId20"/></a:graphicData></a:graphic>
      </wp:inline></w:drawing></w:r></w:p></w:tc></w:tr>
    </w:tbl>
    <w:p/>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#;

fn attachments() -> Attachments {
    Attachments::new()
        .with_link(LinkAttachment::new("rId10", "https://example.com"))
        .with_file(FileAttachment::new("rId20", "media/chart.png"))
}

#[test]
fn test_root_sequence_skips_unknown_tags() {
    let doc = Document::load_body(DOCUMENT).unwrap();

    let kinds: Vec<_> = doc.root_nodes().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Paragraph,
            NodeKind::Paragraph,
            NodeKind::ListItem,
            NodeKind::ListItem,
            NodeKind::ListItem,
            NodeKind::Table,
            NodeKind::Paragraph,
        ]
    );
    // Two paragraphs inside the table cells are in the construction record too
    assert_eq!(doc.nodes().len(), 9);
    assert_eq!(doc.nodes().iter().filter(|n| n.is_from_root()).count(), 7);
}

#[test]
fn test_render_full_document() {
    let doc = BodyParser::from_xml(DOCUMENT)
        .with_attachments(attachments())
        .parse()
        .unwrap();
    let options = RenderOptions::new().with_image_prefix("word/");

    assert_eq!(
        doc.render_with_options(&options).unwrap(),
        concat!(
            r#"<h1 class="Title">Quarterly Report</h1>"#,
            r#"<p>See <a href="https://example.com"><u>the site</u></a>.</p>"#,
            r#"<ul><li class="ListBullet">Revenue<ul><li class="ListBullet">Domestic</li></ul>"#,
            r#"<li class="ListBullet">Costs</li></ul>"#,
            r#"<li><table><tr><td><p>Q1</p></td><td><p><img src="word/media/chart.png" alt="Chart" style="width:50pt;height:50pt" /></p></td></tr></table>"#,
            "<p></p>"
        )
    );
}

#[test]
fn test_render_text_and_json() {
    let doc = Document::load_body(DOCUMENT).unwrap();

    assert_eq!(
        doc.render(RenderFormat::Text).unwrap(),
        "Quarterly Report\n\nSee the site.\n\n- Revenue\n  - Domestic\n- Costs\n\nQ1\tChart"
    );

    let json = doc.render(RenderFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["root"].as_array().unwrap().len(), 7);
}

#[test]
fn test_stats() {
    let doc = Document::load_body(DOCUMENT).unwrap();
    let stats = doc.stats();

    // Title, link paragraph, trailing empty paragraph, two cell paragraphs
    assert_eq!(stats.paragraph_count, 5);
    assert_eq!(stats.list_item_count, 3);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.image_count, 1);
    assert_eq!(stats.link_count, 1);
}

#[test]
fn test_attachment_lookups() {
    let attachments = attachments()
        .with_file(FileAttachment::new("rId20", "media/chart-copy.png"))
        .with_link(LinkAttachment::new("rId11", "https://example.org"));
    let doc = BodyParser::from_xml(DOCUMENT)
        .with_attachments(attachments)
        .parse()
        .unwrap();

    assert_eq!(doc.attached_links(None).len(), 2);
    assert_eq!(doc.attached_files(Some("rId20")).len(), 2);
    assert_eq!(doc.attached_file("rId20").unwrap().path, "media/chart.png");
    assert_eq!(doc.attached_link("rId11").unwrap().target, "https://example.org");
    assert!(doc.attached_links(Some("rId99")).is_empty());
}

#[test]
fn test_no_body_element_is_an_error() {
    let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p/></w:document>"#;
    let err = Document::load_body(xml).unwrap_err();
    assert!(matches!(err, Error::NoBodyElement));
    assert_eq!(err.to_string(), "No body element found");
}

#[test]
fn test_permissive_and_strict_parsing() {
    let broken = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>A &bogus; B</w:t></w:r></w:p></w:body>"#;

    let doc = Document::load_body(broken).unwrap();
    assert_eq!(doc.plain_text(), "A  B");

    let strict = undocx::load_str_with_options(broken, LoadOptions::new().strict());
    assert!(strict.is_err());
}

#[test]
fn test_open_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.xml");
    fs::write(&path, DOCUMENT).unwrap();

    let doc = Document::open(&path).unwrap();
    assert_eq!(doc.root().len(), 7);

    let html = Undocx::new()
        .with_attachments(attachments())
        .with_images(false)
        .load(&path)
        .unwrap()
        .to_html()
        .unwrap();
    assert!(html.contains(r#"<a href="https://example.com">"#));
    assert!(!html.contains("<img"));
}

#[test]
fn test_stylesheet_resolver() {
    let styles = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
      <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/></w:style>
      <w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/></w:style>
    </w:styles>"#;
    let sheet = StyleSheet::from_xml(styles).unwrap();
    let doc = BodyParser::from_xml(DOCUMENT)
        .with_style_resolver(sheet)
        .parse()
        .unwrap();

    let html = doc.render(RenderFormat::Html).unwrap();
    assert!(html.starts_with(r#"<h1 class="title">Quarterly Report</h1>"#));
    assert!(html.contains(r#"<ul><li class="list-bullet">Revenue"#));
}

#[test]
fn test_classification_and_helpers() {
    assert_eq!(classify_tag("w:p"), Classified::Node(ElementKind::Paragraph));
    assert_eq!(classify_tag("w:tbl"), Classified::Node(ElementKind::Table));
    assert_eq!(classify_tag("w:sectPr"), Classified::Skip);

    assert_eq!(Document::sanitize_html_id(" A&nbsp;B<br>"), "docx_A_B");
    assert_eq!(Document::sanitize_html_id(""), "docx_");

    assert_eq!(twips_to_points(240), 12);
    assert_eq!(twips_to_points(0), 0);
}
