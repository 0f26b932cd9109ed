//! Tree construction on top of the `quick-xml` event reader.

use quick_xml::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{split_qname, Attribute, ElementData, XmlDocument, XmlNode, XmlNodeId};
use crate::error::{Error, Result};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// How strictly malformed markup is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Recover from mismatched or unmatched end tags, dangling `&`, unknown
    /// entities and truncated input, keeping whatever was built.
    #[default]
    Permissive,
    /// Fail on any of the above
    Strict,
}

impl ParseMode {
    fn is_strict(self) -> bool {
        self == ParseMode::Strict
    }
}

struct OpenElement {
    id: XmlNodeId,
    name: String,
    declared: Vec<(Option<String>, String)>,
}

struct TreeBuilder {
    doc: XmlDocument,
    stack: Vec<OpenElement>,
    mode: ParseMode,
}

impl TreeBuilder {
    fn new(mode: ParseMode) -> Self {
        Self {
            doc: XmlDocument::default(),
            stack: Vec::new(),
            mode,
        }
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML_NS.to_string());
        }
        self.stack
            .iter()
            .rev()
            .flat_map(|open| open.declared.iter().rev())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty())
    }

    fn open(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut declared = Vec::new();
        let mut raw_attrs = Vec::new();
        let mut attrs = start.attributes();
        attrs.with_checks(self.mode.is_strict());
        for attr in attrs {
            let attr = match attr {
                Ok(attr) => attr,
                Err(e) if self.mode.is_strict() => {
                    return Err(Error::MalformedXml(format!("attribute on <{}>: {}", name, e)))
                }
                Err(e) => {
                    log::debug!("Skipping malformed attribute on <{}>: {}", name, e);
                    continue;
                }
            };
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = unescape(&String::from_utf8_lossy(&attr.value), self.mode)?;

            if key == "xmlns" {
                declared.push((None, value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declared.push((Some(prefix.to_string()), value));
            } else {
                raw_attrs.push((key, value));
            }
        }

        let parent = self.stack.last().map(|open| open.id);
        let id = self.doc.push(
            XmlNode::Element(ElementData {
                name: name.clone(),
                namespace: None,
                attributes: Vec::new(),
                children: Vec::new(),
                parent,
            }),
            parent,
        );
        self.stack.push(OpenElement {
            id,
            name,
            declared,
        });

        // Resolve with this element's own declarations in scope
        let (prefix, _) = split_qname(&self.stack[self.stack.len() - 1].name);
        let namespace = self.lookup(prefix);
        let attributes = raw_attrs
            .into_iter()
            .map(|(name, value)| {
                let namespace = match split_qname(&name) {
                    (Some(prefix), _) => self.lookup(Some(prefix)),
                    (None, _) => None,
                };
                Attribute {
                    name,
                    namespace,
                    value,
                }
            })
            .collect();

        if let XmlNode::Element(data) = &mut self.doc.nodes[id.0] {
            data.namespace = namespace;
            data.attributes = attributes;
        }

        if empty {
            self.stack.pop();
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        let name = String::from_utf8_lossy(name);
        match self.stack.iter().rposition(|open| open.name == name) {
            Some(pos) => self.stack.truncate(pos),
            None => log::debug!("Ignoring unmatched end tag </{}>", name),
        }
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(parent) = self.stack.last().map(|open| open.id) else {
            // Text outside the root element carries no content
            return;
        };
        // Entity references split text into several events; merge them back
        if let Some(&last) = self.last_child(parent) {
            if let XmlNode::Text(existing) = &mut self.doc.nodes[last.0] {
                existing.push_str(text);
                return;
            }
        }
        self.doc.push(XmlNode::Text(text.to_string()), Some(parent));
    }

    fn last_child(&self, parent: XmlNodeId) -> Option<&XmlNodeId> {
        match &self.doc.nodes[parent.0] {
            XmlNode::Element(data) => data.children.last(),
            XmlNode::Text(_) => None,
        }
    }

    fn finish(self) -> Result<XmlDocument> {
        if self.mode.is_strict() {
            if let Some(open) = self.stack.last() {
                return Err(Error::MalformedXml(format!(
                    "unclosed element <{}>",
                    open.name
                )));
            }
        }
        Ok(self.doc)
    }
}

/// Parse XML text into an [`XmlDocument`].
pub(super) fn parse(text: &str, mode: ParseMode) -> Result<XmlDocument> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    {
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = false;
        if !mode.is_strict() {
            config.check_end_names = false;
            config.allow_unmatched_ends = true;
            config.allow_dangling_amp = true;
        }
    }

    let mut builder = TreeBuilder::new(mode);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => builder.open(&e, false)?,
            Ok(Event::Empty(e)) => builder.open(&e, true)?,
            Ok(Event::End(e)) => builder.close(e.name().as_ref()),
            Ok(Event::Text(e)) => builder.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::CData(e)) => builder.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => builder.text(&resolved),
                    None if mode.is_strict() => {
                        return Err(Error::MalformedXml(format!(
                            "unresolved entity &{};",
                            entity
                        )))
                    }
                    None => log::debug!("Dropping unresolved entity &{};", entity),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                if mode.is_strict() {
                    return Err(e.into());
                }
                log::warn!(
                    "Recovered from XML error near byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    builder.finish()
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    if let Some(predefined) = escape::resolve_predefined_entity(entity) {
        return Some(predefined.to_string());
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };

    code.and_then(char::from_u32).map(|c| c.to_string())
}

/// Expand entity references inside an attribute value.
fn unescape(raw: &str, mode: ParseMode) -> Result<String> {
    match escape::unescape(raw) {
        Ok(value) => Ok(value.into_owned()),
        Err(e) if mode.is_strict() => Err(Error::MalformedXml(format!(
            "attribute value {:?}: {}",
            raw, e
        ))),
        Err(e) => {
            log::debug!("Keeping raw attribute value {:?}: {}", raw, e);
            Ok(raw.to_string())
        }
    }
}
