//! Document access layer: a small in-memory element tree over quick-xml.
//!
//! Capabilities documents mix namespace prefixes inconsistently across
//! dialects, so tag names are matched literally, prefix included
//! (`ows:Title` does not match `Title`). No namespace resolution happens
//! anywhere in this layer.

use ogc_common::{CapabilitiesError, CapabilitiesResult};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed XML document holding its elements in document order.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: usize,
}

impl Document {
    /// Parse XML text into an element tree.
    ///
    /// Any reader error (bad syntax, mismatched or unclosed tags) maps to
    /// [`CapabilitiesError::MalformedXml`]. An input with no elements
    /// parses successfully into an empty document, so "failed to parse" and
    /// "parsed but empty" stay distinguishable.
    pub fn parse(text: &str) -> CapabilitiesResult<Self> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let id = push_element(&mut nodes, &stack, &e)?;
                    stack.push(id);
                }
                Ok(Event::Empty(e)) => {
                    push_element(&mut nodes, &stack, &e)?;
                }
                Ok(Event::Text(t)) => {
                    if let Some(&id) = stack.last() {
                        let text = t.unescape().map_err(xml_error)?;
                        nodes[id].text.push_str(&text);
                    }
                }
                Ok(Event::CData(t)) => {
                    if let Some(&id) = stack.last() {
                        nodes[id]
                            .text
                            .push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // declaration, comments, PIs, doctype
                Err(e) => {
                    return Err(CapabilitiesError::MalformedXml(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
            buf.clear();
        }

        if let Some(&id) = stack.last() {
            return Err(CapabilitiesError::MalformedXml(format!(
                "unexpected end of document: <{}> is never closed",
                nodes[id].tag
            )));
        }

        Ok(Document { nodes })
    }

    /// Whether the document contains no elements at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The document's root element, if any.
    pub fn root(&self) -> Option<Element<'_>> {
        self.nodes
            .iter()
            .position(|n| n.parent.is_none())
            .map(|id| Element { doc: self, id })
    }

    /// All elements with the given literal tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<Element<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.tag == tag)
            .map(|(id, _)| Element { doc: self, id })
            .collect()
    }

    /// First element with the given literal tag name, in document order.
    pub fn first_by_tag(&self, tag: &str) -> Option<Element<'_>> {
        self.nodes
            .iter()
            .position(|n| n.tag == tag)
            .map(|id| Element { doc: self, id })
    }
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        &self.doc.nodes[self.id]
    }

    /// Literal tag name, prefix included.
    pub fn tag(&self) -> &'a str {
        &self.node().tag
    }

    /// Attribute value by literal attribute name (e.g. `xlink:href`).
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parent element, for ancestor walks.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.node().parent.map(|id| Element { doc: self.doc, id })
    }

    /// Direct child elements in declaration order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .map(move |&id| Element { doc, id })
    }

    /// Trimmed text content of the whole subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.node().text);
        for child in self.children() {
            child.collect_text(out);
        }
    }

    /// All descendants with the given literal tag name, in document order.
    pub fn descendants(&self, tag: &str) -> Vec<Element<'a>> {
        let mut out = Vec::new();
        self.collect_descendants(tag, &mut out);
        out
    }

    fn collect_descendants(&self, tag: &str, out: &mut Vec<Element<'a>>) {
        for child in self.children() {
            if child.tag() == tag {
                out.push(child);
            }
            child.collect_descendants(tag, out);
        }
    }

    /// First descendant with the given literal tag name.
    pub fn first(&self, tag: &str) -> Option<Element<'a>> {
        self.descendants(tag).into_iter().next()
    }
}

/// Trimmed text of the first descendant matching `tag`, or empty string.
///
/// Deliberately lossy: "element missing" and "element present but empty"
/// both come back as `""`. Callers that need the distinction convert at
/// model-construction time via [`non_empty`].
pub fn element_text(parent: Element<'_>, tag: &str) -> String {
    parent.first(tag).map(|e| e.text()).unwrap_or_default()
}

/// Map extracted text to `None` when empty, for optional model fields.
pub fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn push_element(
    nodes: &mut Vec<Node>,
    stack: &[usize],
    e: &quick_xml::events::BytesStart<'_>,
) -> CapabilitiesResult<usize> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| CapabilitiesError::MalformedXml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }

    let parent = stack.last().copied();
    let id = nodes.len();
    nodes.push(Node {
        tag,
        attributes,
        text: String::new(),
        parent,
        children: Vec::new(),
    });
    if let Some(parent_id) = parent {
        nodes[parent_id].children.push(id);
    }
    Ok(id)
}

fn xml_error(e: quick_xml::Error) -> CapabilitiesError {
    CapabilitiesError::MalformedXml(e.to_string())
}
