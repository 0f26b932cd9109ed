//! Benchmarks for undocx loading and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic document bodies mixing plain paragraphs,
//! nested lists, and tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn list_item(level: u32, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        level, text
    )
}

/// Creates a synthetic body with the given number of sections.
fn create_test_body(sections: usize) -> String {
    let mut body = String::new();

    for i in 0..sections {
        body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Section {}</w:t></w:r></w:p>"#,
            i + 1
        ));
        body.push_str(
            r#"<w:p><w:r><w:t xml:space="preserve">Benchmark content with </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r><w:r><w:t> text.</w:t></w:r></w:p>"#,
        );

        // Saw-tooth list levels exercise every transition
        for level in [0, 1, 2, 1, 0, 2, 0] {
            body.push_str(&list_item(level, "item"));
        }

        body.push_str("<w:tbl>");
        for _ in 0..3 {
            body.push_str("<w:tr>");
            for _ in 0..3 {
                body.push_str(&format!("<w:tc>{}{}</w:tc>", list_item(0, "cell"), list_item(1, "nested")));
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    format!(
        r#"<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

/// Benchmark XML tree construction alone.
fn bench_xml_parsing(c: &mut Criterion) {
    let xml = create_test_body(50);

    c.bench_function("xml_tree_50_sections", |b| {
        b.iter(|| undocx::xml::XmlDocument::parse(black_box(&xml), undocx::ParseMode::Permissive).unwrap());
    });
}

/// Benchmark document loading at various sizes.
fn bench_document_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_loading");

    for sections in [1, 10, 100].iter() {
        let xml = create_test_body(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| undocx::load_str(black_box(&xml)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the list pass in isolation.
fn bench_list_levels(c: &mut Criterion) {
    let options = undocx::LoadOptions::new().with_close_trailing_lists(true);
    let entries: Vec<_> = (0..1000u32)
        .map(|i| undocx::parser::ListEntry::new(i % 5, if i % 2 == 0 { "even" } else { "" }))
        .collect();

    c.bench_function("list_levels_1000", |b| {
        b.iter(|| undocx::parser::process_list_levels(black_box(&entries), &options));
    });
}

/// Benchmark rendering of a loaded document.
fn bench_rendering(c: &mut Criterion) {
    let doc = undocx::load_str(&create_test_body(50)).unwrap();

    c.bench_function("render_html_50_sections", |b| {
        b.iter(|| black_box(&doc).render(undocx::RenderFormat::Html).unwrap());
    });

    c.bench_function("render_text_50_sections", |b| {
        b.iter(|| black_box(&doc).render(undocx::RenderFormat::Text).unwrap());
    });
}

criterion_group!(
    benches,
    bench_xml_parsing,
    bench_document_loading,
    bench_list_levels,
    bench_rendering,
);
criterion_main!(benches);
