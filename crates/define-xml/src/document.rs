//! Generic namespaced XML tree.
//!
//! The loader decodes the caller's bytes with the named character encoding and
//! builds a plain element tree with resolved namespace URIs. Attribute and
//! child order are kept exactly as written. No schema knowledge lives here.

use std::borrow::Cow;
use std::fmt;

use define_model::{DefineError, Result};
use encoding_rs::Encoding;
use quick_xml::NsReader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace-qualified element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub namespace: Option<String>,
    pub local: String,
}

impl Name {
    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local == local
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: Name,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Value of the attribute with the given namespace and local name.
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.is(namespace, local))
            .map(|attribute| attribute.value.as_str())
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(existing)) = self.children.last_mut() {
            existing.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Drops indentation between child elements.
    fn finish(&mut self) {
        let has_elements = self
            .children
            .iter()
            .any(|node| matches!(node, Node::Element(_)));
        if has_elements {
            self.children.retain(|node| match node {
                Node::Text(text) => !text.trim().is_empty(),
                Node::Element(_) => true,
            });
        }
    }
}

/// Decodes `bytes` and parses the result into an element tree.
///
/// A byte order mark overrides `encoding`. The XML declaration's own encoding
/// pseudo-attribute is not consulted.
///
/// # Errors
///
/// [`DefineError::UnsupportedEncoding`] when the label is unknown, and
/// [`DefineError::MalformedDocument`] when the bytes are not valid in the
/// encoding or do not form a well-formed document.
pub fn load(bytes: &[u8], encoding: &str) -> Result<Element> {
    let text = decode(bytes, encoding)?;
    parse(&text)
}

/// Decodes `bytes` with the encoding named by `label`, without replacement.
pub fn decode<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>> {
    let declared = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        DefineError::UnsupportedEncoding {
            label: label.to_string(),
        }
    })?;
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((declared, 0));
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or_else(|| {
            DefineError::malformed(
                format!("input is not valid {}", encoding.name()),
                None,
            )
        })
}

/// Parses already decoded text into an element tree.
///
/// # Errors
///
/// [`DefineError::MalformedDocument`] for anything that is not a single
/// well-formed, namespace-valid root element.
pub fn parse(text: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(text);
    let mut tree = TreeBuilder::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|err| malformed_at(&reader, err))?;
        match event {
            Event::Start(start) => {
                let element = open_element(&reader, &start)?;
                tree.open(element, &reader)?;
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                tree.open(element, &reader)?;
                tree.close(&reader)?;
            }
            Event::End(_) => tree.close(&reader)?,
            Event::Text(text) => {
                let text = text.decode().map_err(|err| malformed_at(&reader, err))?;
                tree.text(&text, &reader)?;
            }
            Event::CData(data) => {
                let text = data.decode().map_err(|err| malformed_at(&reader, err))?;
                tree.text(&text, &reader)?;
            }
            Event::GeneralRef(reference) => {
                let text = resolve_reference(&reference, &reader)?;
                tree.text(&text, &reader)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tree.finish()
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn open(&mut self, element: Element, reader: &NsReader<&[u8]>) -> Result<()> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(malformed_here(
                reader,
                format!("second root element <{}>", element.name.local),
            ));
        }
        self.open.push(element);
        Ok(())
    }

    fn close(&mut self, reader: &NsReader<&[u8]>) -> Result<()> {
        let mut element = self
            .open
            .pop()
            .ok_or_else(|| malformed_here(reader, "closing tag without an open element"))?;
        element.finish();
        match self.open.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn text(&mut self, text: &str, reader: &NsReader<&[u8]>) -> Result<()> {
        match self.open.last_mut() {
            Some(parent) => parent.push_text(text),
            None if text.trim().is_empty() => {}
            None => return Err(malformed_here(reader, "text outside the root element")),
        }
        Ok(())
    }

    fn finish(self) -> Result<Element> {
        if let Some(unclosed) = self.open.last() {
            return Err(DefineError::malformed(
                format!("unclosed element <{}>", unclosed.name.local),
                None,
            ));
        }
        self.root
            .ok_or_else(|| DefineError::malformed("document has no root element", None))
    }
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Element> {
    let (resolved, local) = reader.resolve_element(start.name());
    let name = Name {
        namespace: namespace_uri(resolved, start.name(), reader)?,
        local: utf8(local.as_ref(), reader)?,
    };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| malformed_at(reader, err))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attribute.key);
        let value = attribute_value(&attribute.value, reader)?;
        attributes.push(Attribute {
            name: Name {
                namespace: namespace_uri(resolved, attribute.key, reader)?,
                local: utf8(local.as_ref(), reader)?,
            },
            value,
        });
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn namespace_uri(
    resolved: ResolveResult<'_>,
    qname: QName<'_>,
    reader: &NsReader<&[u8]>,
) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(Some(utf8(namespace.0, reader)?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(Some(XML_NAMESPACE.to_string())),
        ResolveResult::Unknown(prefix) => Err(malformed_here(
            reader,
            format!(
                "undeclared namespace prefix '{}' on {}",
                String::from_utf8_lossy(&prefix),
                String::from_utf8_lossy(qname.as_ref())
            ),
        )),
    }
}

/// Normalises literal whitespace to spaces, then expands references, so a
/// `&#10;` still yields a newline.
fn attribute_value(raw: &[u8], reader: &NsReader<&[u8]>) -> Result<String> {
    let raw = std::str::from_utf8(raw).map_err(|err| malformed_at(reader, err))?;
    let normalized: String = raw
        .replace("\r\n", "\n")
        .chars()
        .map(|ch| if matches!(ch, '\t' | '\n' | '\r') { ' ' } else { ch })
        .collect();
    unescape(&normalized)
        .map(Cow::into_owned)
        .map_err(|err| malformed_at(reader, err))
}

fn resolve_reference(reference: &BytesRef<'_>, reader: &NsReader<&[u8]>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|err| malformed_at(reader, err))?
    {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|err| malformed_at(reader, err))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| malformed_here(reader, format!("unknown entity &{name};")))
}

fn utf8(bytes: &[u8], reader: &NsReader<&[u8]>) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| malformed_at(reader, err))
}

fn malformed_at(reader: &NsReader<&[u8]>, err: impl fmt::Display) -> DefineError {
    DefineError::malformed(err.to_string(), u64::try_from(reader.error_position()).ok())
}

fn malformed_here(reader: &NsReader<&[u8]>, message: impl Into<String>) -> DefineError {
    DefineError::malformed(message, u64::try_from(reader.buffer_position()).ok())
}
