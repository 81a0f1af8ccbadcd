/*!
 * Minimal owned XML node tree.
 *
 * The TMX reader walks translation units recursively and in parallel,
 * which wants a materialized tree rather than a one-shot event stream.
 * This module builds that tree with quick-xml, resolving namespaces,
 * preserving whitespace exactly as written (segment text is data), and
 * discarding comments and processing instructions.
 *
 * Input is treated as UTF-8; a leading BOM is tolerated.
 */

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::errors::XmlError;

/// One attribute of an element. Namespace declarations are consumed by
/// the parser and never appear here.
#[derive(Debug, Clone)]
pub struct XmlAttr {
    pub prefix: Option<String>,
    pub name: String,
    pub value: String,
}

/// A child node of an element.
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its resolved namespace, local name, attributes and
/// child nodes.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub namespace: Option<String>,
    pub name: String,
    pub attrs: Vec<XmlAttr>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Looks up an un-prefixed attribute by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.prefix.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Looks up a prefixed attribute, e.g. `xml:lang`.
    pub fn prefixed_attr(&self, prefix: &str, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.prefix.as_deref() == Some(prefix) && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// True when this element has the given namespace and local name.
    pub fn is_named(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.name == name
    }

    /// The first child element with the given namespace and local name.
    pub fn find(&self, namespace: Option<&str>, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.is_named(namespace, name))
    }

    /// All child elements with the given namespace and local name.
    pub fn find_all<'a>(
        &'a self,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.child_elements().filter(move |e| e.is_named(namespace, name))
    }

    /// The concatenated text of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Parses a complete document and returns its root element.
pub fn parse(bytes: &[u8]) -> Result<XmlElement, XmlError> {
    let mut reader = NsReader::from_reader(strip_bom(bytes));
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        let (resolve, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(e) => {
                let element = element_from(resolve, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = element_from(resolve, &e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlError::UnexpectedEof)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => return Ok(element),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Text(text.into_owned())),
                    None if text.chars().all(char::is_whitespace) => {}
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Text(text)),
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            // Comments, PIs and prolog noise carry no segment data.
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => return Err(XmlError::UnexpectedEof),
        }
        buf.clear();
    }
}

/// Peeks the root element (name, namespace, attributes) without parsing
/// the rest of the document. Returns `None` when the input has no
/// well-formed root element.
pub fn peek_root(bytes: &[u8]) -> Option<XmlElement> {
    let mut reader = NsReader::from_reader(strip_bom(bytes));
    let mut buf = Vec::new();

    loop {
        let (resolve, event) = reader.read_resolved_event_into(&mut buf).ok()?;
        match event {
            Event::Start(e) | Event::Empty(e) => return element_from(resolve, &e).ok(),
            Event::Text(e) => {
                let text = e.unescape().ok()?;
                if !text.chars().all(char::is_whitespace) {
                    return None;
                }
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            _ => return None,
        }
        buf.clear();
    }
}

fn element_from(resolve: ResolveResult<'_>, start: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let namespace = match resolve {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(XmlError::UnknownPrefix(String::from_utf8_lossy(&prefix).into_owned()));
        }
    };
    let name = String::from_utf8_lossy(start.local_name().into_inner()).into_owned();

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        attrs.push(XmlAttr {
            prefix: attr
                .key
                .prefix()
                .map(|p| String::from_utf8_lossy(p.into_inner()).into_owned()),
            name: String::from_utf8_lossy(attr.key.local_name().into_inner()).into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(XmlElement { namespace, name, attrs, children: Vec::new() })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF_u8, 0xBB, 0xBF][..]).unwrap_or(bytes)
}
