//! Minimal element tree over quick-xml events.
//!
//! Doxygen output is small and mixed-content heavy (`<type>` and
//! `<briefdescription>` interleave text with child elements), so the whole
//! document is materialized once and queried by the tree builder.

use crate::error::{ErrorKind, ParseError, Position};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// XML node: element or text
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// XML element with attributes in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    /// Byte offset of the start tag in the source
    pub offset: usize,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>, offset: usize) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            offset,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.name == name)
    }

    /// All elements named `name` below this one, in document order
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for el in self.elements() {
            if el.name == name {
                found.push(el);
            }
            el.collect_descendants(name, found);
        }
    }

    /// Concatenated direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Serialize back to XML markup, escaping text and attribute values
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value, true));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.write_xml(out),
                XmlNode::Text(text) => out.push_str(&escape(text, false)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Parse an XML document into its root element.
pub fn parse(source: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let malformed = |err: &dyn std::fmt::Display| {
            ParseError::new(ErrorKind::MalformedXml, format!("XML parse error: {}", err))
                .at(Position::at(source, offset))
        };

        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let (name, attributes) = read_tag(&e).map_err(|err| malformed(&err))?;
                let start = tag_start(source, reader.buffer_position() as usize);
                stack.push(Element::new(name, attributes, start));
            }

            Ok(Event::Empty(e)) => {
                let (name, attributes) = read_tag(&e).map_err(|err| malformed(&err))?;
                let start = tag_start(source, reader.buffer_position() as usize);
                let element = Element::new(name, attributes, start);
                attach(&mut stack, &mut root, element, source)?;
            }

            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element, source)?;
                }
            }

            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| malformed(&err))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }

            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.into_inner().as_ref()).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text));
                }
            }

            Ok(Event::Eof) => break,

            // Declarations, comments, processing instructions, doctype
            Ok(_) => {}

            Err(err) => return Err(malformed(&err)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::new(
            ErrorKind::UnclosedElement,
            format!("<{}> is never closed", open.name),
        )
        .at(Position::at(source, open.offset)));
    }

    root.ok_or_else(|| {
        ParseError::new(ErrorKind::MalformedXml, "document has no root element")
            .with_help("Point the tool at Doxygen XML output (GENERATE_XML = YES)")
    })
}

/// Offset of the `<` opening the tag that ends at `end`
fn tag_start(source: &str, end: usize) -> usize {
    let end = end.min(source.len());
    source.as_bytes()[..end].iter().rposition(|&b| b == b'<').unwrap_or(0)
}

fn read_tag(tag: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>), quick_xml::Error> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    source: &str,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::new(
            ErrorKind::MalformedXml,
            format!("unexpected second root element <{}>", element.name),
        )
        .at(Position::at(source, element.offset)));
    }
    *root = Some(element);
    Ok(())
}
