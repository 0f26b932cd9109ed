//! Namespace prefix bindings used for structural queries.

use std::collections::BTreeMap;

/// WordprocessingML main namespace.
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// WordprocessingML drawing namespace.
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace.
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML picture namespace.
pub const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// Legacy VML namespace.
pub const V_NS: &str = "urn:schemas-microsoft-com:vml";
/// Markup compatibility namespace.
pub const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
/// Office document relationships namespace.
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Prefix to namespace URI table.
///
/// Queries such as `w:body` are written against these prefixes, independent of
/// whatever prefixes the source document happens to declare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    bindings: BTreeMap<String, String>,
}

impl Namespaces {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed table of WordprocessingML namespaces.
    pub fn wordprocessing() -> Self {
        let mut ns = Self::new();
        ns.register("mc", MC_NS);
        ns.register("wp", WP_NS);
        ns.register("w", W_NS);
        ns.register("a", A_NS);
        ns.register("pic", PIC_NS);
        ns.register("v", V_NS);
        ns.register("r", R_NS);
        ns
    }

    /// Bind a prefix, replacing any previous binding.
    pub fn register(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.bindings.insert(prefix.into(), uri.into());
    }

    /// Look up the URI bound to a prefix.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Iterate over `(prefix, uri)` pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Check whether a node name matches a prefixed query name.
    ///
    /// `name` is the qualified name as written in the source and `namespace`
    /// the URI it resolved to. Without a resolved namespace, or when the query
    /// prefix is not bound, the literal qualified names are compared.
    pub fn matches(&self, query: &str, name: &str, namespace: Option<&str>) -> bool {
        let (query_prefix, query_local) = split_qname(query);
        let expected = query_prefix.and_then(|p| self.uri(p));

        match (namespace, expected) {
            (Some(actual), Some(expected)) => {
                actual == expected && split_qname(name).1 == query_local
            }
            _ => name == query,
        }
    }
}

/// Split `prefix:local` into its parts.
pub fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordprocessing_table() {
        let ns = Namespaces::wordprocessing();
        assert_eq!(ns.uri("w"), Some(W_NS));
        assert_eq!(ns.uri("pic"), Some(PIC_NS));
        assert_eq!(ns.uri("x"), None);
        assert_eq!(ns.iter().count(), 7);
    }

    #[test]
    fn test_matches_by_namespace() {
        let ns = Namespaces::wordprocessing();
        // Source used a different prefix for the main namespace
        assert!(ns.matches("w:p", "word:p", Some(W_NS)));
        assert!(!ns.matches("w:p", "a:p", Some(A_NS)));
        assert!(!ns.matches("w:p", "w:tbl", Some(W_NS)));
    }

    #[test]
    fn test_matches_literal_fallback() {
        let ns = Namespaces::wordprocessing();
        assert!(ns.matches("w:body", "w:body", None));
        assert!(!ns.matches("w:body", "body", None));
        assert!(ns.matches("x:thing", "x:thing", Some("urn:x")));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("w:p"), (Some("w"), "p"));
        assert_eq!(split_qname("body"), (None, "body"));
    }
}
