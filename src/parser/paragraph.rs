//! Paragraph construction from `w:p` elements.

use std::num::IntErrorKind;

use crate::model::{
    Alignment, Inline, LinkTarget, Numbering, Paragraph, ParagraphProperties, TextRun, TextStyle,
    MAX_ILVL,
};
use crate::units::parse_twips;
use crate::xml::{ElementRef, Namespaces};

/// EMUs per point (DrawingML extents).
const EMU_PER_POINT: i64 = 12_700;

/// Bookmark Word inserts to remember the last edit position.
const GO_BACK_BOOKMARK: &str = "_GoBack";

/// Containers whose children are read as if they were inline siblings.
const TRANSPARENT_CONTAINERS: &[&str] = &[
    "w:ins",
    "w:smartTag",
    "w:fldSimple",
    "w:customXml",
    "w:sdt",
    "w:sdtContent",
    "w:moveTo",
];

pub(crate) fn read_paragraph(element: ElementRef<'_>, ns: &Namespaces) -> Paragraph {
    let mut paragraph = Paragraph::new();

    if let Some(ppr) = element.child(ns, "w:pPr") {
        paragraph.properties = read_properties(ppr, ns);
    }

    let mut content = Vec::new();
    read_inlines(element, ns, &mut content);
    for inline in content {
        paragraph.add_inline(inline);
    }

    paragraph
}

fn val<'a>(element: ElementRef<'a>, ns: &Namespaces) -> Option<&'a str> {
    element.attr(ns, "w:val")
}

fn read_properties(ppr: ElementRef<'_>, ns: &Namespaces) -> ParagraphProperties {
    let indent_left_pt = ppr.child(ns, "w:ind").and_then(|ind| {
        ind.attr(ns, "w:left")
            .or_else(|| ind.attr(ns, "w:start"))
            .and_then(parse_twips)
    });

    ParagraphProperties {
        style_id: ppr
            .child(ns, "w:pStyle")
            .and_then(|e| val(e, ns))
            .map(str::to_string),
        alignment: ppr
            .child(ns, "w:jc")
            .and_then(|e| val(e, ns))
            .map_or(Alignment::Left, Alignment::from_jc),
        numbering: ppr
            .child(ns, "w:numPr")
            .and_then(|num_pr| read_numbering(num_pr, ns)),
        indent_left_pt,
    }
}

/// `w:numPr` without a `w:numId` carries no list membership of its own.
///
/// Levels beyond [`MAX_ILVL`], however large, are read as `MAX_ILVL`.
fn read_numbering(num_pr: ElementRef<'_>, ns: &Namespaces) -> Option<Numbering> {
    let number = |qname: &str| {
        num_pr
            .child(ns, qname)
            .and_then(|e| val(e, ns))
            .and_then(|v| match v.trim().parse::<u64>() {
                Ok(n) => Some(n),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
                Err(_) => None,
            })
    };

    let num_id = u32::try_from(number("w:numId")?).ok()?;
    let ilvl = number("w:ilvl").map_or(0, |l| l.min(u64::from(MAX_ILVL)) as u32);
    Some(Numbering::new(num_id, ilvl))
}

fn read_inlines(parent: ElementRef<'_>, ns: &Namespaces, out: &mut Vec<Inline>) {
    for child in parent.children() {
        if child.is(ns, "w:r") {
            read_run(child, ns, out);
        } else if child.is(ns, "w:hyperlink") {
            let mut content = Vec::new();
            read_inlines(child, ns, &mut content);
            match link_target(child, ns) {
                Some(target) => out.push(Inline::link(target, content)),
                None => out.extend(content),
            }
        } else if child.is(ns, "w:bookmarkStart") {
            if let Some(name) = child.attr(ns, "w:name") {
                if name != GO_BACK_BOOKMARK {
                    out.push(Inline::Bookmark {
                        name: name.to_string(),
                    });
                }
            }
        } else if TRANSPARENT_CONTAINERS.iter().any(|q| child.is(ns, q)) {
            read_inlines(child, ns, out);
        }
    }
}

fn link_target(link: ElementRef<'_>, ns: &Namespaces) -> Option<LinkTarget> {
    if let Some(id) = link.attr(ns, "r:id") {
        return Some(LinkTarget::Relationship(id.to_string()));
    }
    link.attr(ns, "w:anchor")
        .map(|anchor| LinkTarget::Anchor(anchor.to_string()))
}

fn read_run(run: ElementRef<'_>, ns: &Namespaces, out: &mut Vec<Inline>) {
    let style = run
        .child(ns, "w:rPr")
        .map(|rpr| read_run_style(rpr, ns))
        .unwrap_or_default();

    for child in run.children() {
        read_run_child(child, style, ns, out);
    }
}

fn read_run_child(child: ElementRef<'_>, style: TextStyle, ns: &Namespaces, out: &mut Vec<Inline>) {
    if child.is(ns, "w:t") {
        out.push(Inline::Text(TextRun::styled(child.text(), style)));
    } else if child.is(ns, "w:tab") {
        out.push(Inline::Tab);
    } else if child.is(ns, "w:br") {
        // Page and column breaks have no inline equivalent
        if matches!(child.attr(ns, "w:type"), None | Some("textWrapping")) {
            out.push(Inline::LineBreak);
        }
    } else if child.is(ns, "w:cr") {
        out.push(Inline::LineBreak);
    } else if child.is(ns, "w:noBreakHyphen") {
        out.push(Inline::Text(TextRun::styled("-", style)));
    } else if child.is(ns, "w:drawing") {
        out.extend(read_drawing(child, ns));
    } else if child.is(ns, "w:pict") {
        out.extend(read_pict(child, ns));
    } else if child.is(ns, "mc:AlternateContent") {
        if let Some(choice) = child.child(ns, "mc:Choice") {
            for inner in choice.children() {
                read_run_child(inner, style, ns, out);
            }
        }
    }
}

fn read_run_style(rpr: ElementRef<'_>, ns: &Namespaces) -> TextStyle {
    let vert_align = rpr.child(ns, "w:vertAlign").and_then(|e| val(e, ns));

    TextStyle {
        bold: toggle(rpr, ns, "w:b"),
        italic: toggle(rpr, ns, "w:i"),
        underline: rpr
            .child(ns, "w:u")
            .is_some_and(|u| !matches!(val(u, ns), Some("none"))),
        strikethrough: toggle(rpr, ns, "w:strike") || toggle(rpr, ns, "w:dstrike"),
        superscript: vert_align == Some("superscript"),
        subscript: vert_align == Some("subscript"),
    }
}

/// On/off property: present means on unless `w:val` turns it off.
fn toggle(rpr: ElementRef<'_>, ns: &Namespaces, qname: &str) -> bool {
    rpr.child(ns, qname)
        .is_some_and(|e| !matches!(val(e, ns), Some("0" | "false" | "off")))
}

fn emu_to_points(value: &str) -> Option<i64> {
    let emu = value.trim().parse::<i64>().ok()?;
    Some((emu + EMU_PER_POINT / 2).div_euclid(EMU_PER_POINT))
}

fn read_drawing(drawing: ElementRef<'_>, ns: &Namespaces) -> Option<Inline> {
    let blip = drawing.descendants().find(|e| e.is(ns, "a:blip"))?;
    let linkup_id = blip.attr(ns, "r:embed").or_else(|| blip.attr(ns, "r:link"))?;

    let alt_text = drawing
        .descendants()
        .find(|e| e.is(ns, "wp:docPr"))
        .and_then(|doc_pr| {
            doc_pr
                .attr(ns, "descr")
                .filter(|d| !d.is_empty())
                .or_else(|| doc_pr.attr(ns, "title"))
        })
        .filter(|alt| !alt.is_empty())
        .map(str::to_string);

    let extent = drawing.descendants().find(|e| e.is(ns, "wp:extent"));
    let size = |axis: &str| extent.and_then(|e| e.attr(ns, axis)).and_then(emu_to_points);

    Some(Inline::Image {
        linkup_id: linkup_id.to_string(),
        alt_text,
        width_pt: size("cx"),
        height_pt: size("cy"),
    })
}

fn read_pict(pict: ElementRef<'_>, ns: &Namespaces) -> Option<Inline> {
    let image = pict.descendants().find(|e| e.is(ns, "v:imagedata"))?;
    let linkup_id = image.attr(ns, "r:id")?;

    Some(Inline::Image {
        linkup_id: linkup_id.to_string(),
        alt_text: image
            .raw_attr("o:title")
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        width_pt: None,
        height_pt: None,
    })
}
