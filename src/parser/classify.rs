//! Element classification.

use crate::xml::{ElementRef, Namespaces};

/// Node variants a body child can become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `w:p`
    Paragraph,
    /// `w:tbl`
    Table,
}

/// Result of classifying an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// Construct a node of this kind
    Node(ElementKind),
    /// Not a node; ignore it
    Skip,
}

impl Classified {
    /// The element kind, if any.
    pub fn kind(self) -> Option<ElementKind> {
        match self {
            Classified::Node(kind) => Some(kind),
            Classified::Skip => None,
        }
    }
}

/// Recognised tags. Everything else (`w:sectPr`, `w:bookmarkStart`,
/// `w:sdt`, ...) is skipped.
const ELEMENT_TABLE: &[(&str, ElementKind)] = &[
    ("w:tbl", ElementKind::Table),
    ("w:p", ElementKind::Paragraph),
];

/// Classify an element by its namespace-resolved name.
pub fn classify(element: ElementRef<'_>, ns: &Namespaces) -> Classified {
    ELEMENT_TABLE
        .iter()
        .find(|(tag, _)| element.is(ns, tag))
        .map_or(Classified::Skip, |&(_, kind)| Classified::Node(kind))
}

/// Classify a literal qualified tag name.
pub fn classify_tag(tag: &str) -> Classified {
    ELEMENT_TABLE
        .iter()
        .find(|(known, _)| *known == tag)
        .map_or(Classified::Skip, |&(_, kind)| Classified::Node(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{ParseMode, XmlDocument};

    #[test]
    fn test_classify_tag() {
        assert_eq!(classify_tag("w:p"), Classified::Node(ElementKind::Paragraph));
        assert_eq!(classify_tag("w:tbl"), Classified::Node(ElementKind::Table));
        assert_eq!(classify_tag("w:sectPr"), Classified::Skip);
        assert_eq!(classify_tag(""), Classified::Skip);
        assert_eq!(classify_tag("w:drawing").kind(), None);
    }

    #[test]
    fn test_classify_element() {
        let xml = r#"<w:body xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
                            xmlns:m="urn:other"><w:p/><w:tbl/><m:p/><w:sectPr/></w:body>"#;
        let doc = XmlDocument::parse(xml, ParseMode::Strict).unwrap();
        let ns = Namespaces::wordprocessing();
        let kinds: Vec<_> = doc
            .root()
            .unwrap()
            .children()
            .map(|child| classify(child, &ns))
            .collect();

        assert_eq!(
            kinds,
            vec![
                Classified::Node(ElementKind::Paragraph),
                Classified::Node(ElementKind::Table),
                Classified::Skip,
                Classified::Skip,
            ]
        );
    }
}
