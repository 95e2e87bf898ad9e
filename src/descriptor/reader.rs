//! XML reader building the element tree
//!
//! Parses descriptor fragments and whole `datasets.xml` documents with
//! quick-xml's event reader. Whitespace-only text is dropped while
//! reading, so re-serialising with indentation does not accumulate blank
//! lines.

use log::debug;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::descriptor::element::{Element, XmlNode};
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::utils::encoding_utils;

/// A full XML document: the root element plus any comments before it
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Top-level comments preceding the root element
    pub prolog: Vec<XmlNode>,
    /// Root element
    pub root: Element,
}

/// Parse an XML fragment and return its root element
///
/// Anything after the first complete element is ignored.
pub fn parse_fragment(xml: &str) -> ErddapResult<Element> {
    Ok(parse_document(xml)?.root)
}

/// Parse a complete XML document
pub fn parse_document(xml: &str) -> ErddapResult<XmlDocument> {
    let mut reader = Reader::from_str(xml);

    let mut prolog = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ErddapError::XmlError(format!("at position {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(XmlDocument { prolog, root });
                }
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    ErddapError::XmlError(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(XmlDocument { prolog, root });
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| ErddapError::XmlError(e.to_string()))?;
                if text.trim().is_empty() {
                    continue;
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let body = String::from_utf8_lossy(&data).into_owned();
                    parent.children.push(XmlNode::CData(body));
                }
            }
            Event::Comment(comment) => {
                let body = String::from_utf8_lossy(&comment).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Comment(body)),
                    None => prolog.push(XmlNode::Comment(body)),
                }
            }
            Event::Eof => {
                return Err(ErddapError::XmlError(if stack.is_empty() {
                    "document has no root element".to_string()
                } else {
                    format!("unexpected end of document inside <{}>", stack[stack.len() - 1].name)
                }));
            }
            // Declarations, doctypes and processing instructions are not kept
            _ => {}
        }
    }
}

/// Read and parse an XML file, honouring an ISO-8859-1 declaration
pub fn read_document<P: AsRef<Path>>(path: P) -> ErddapResult<XmlDocument> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let content = encoding_utils::decode_xml_bytes(&bytes)?;
    debug!("Read {} bytes of XML from {}", bytes.len(), path.display());
    parse_document(&content)
}

/// Read and parse an XML fragment file
pub fn read_fragment<P: AsRef<Path>>(path: P) -> ErddapResult<Element> {
    Ok(read_document(path)?.root)
}

fn element_from_start(start: &BytesStart) -> ErddapResult<Element> {
    let mut element = Element::new(&String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ErddapError::XmlError(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ErddapError::XmlError(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Attach a finished element to its parent, or hand it back if it is the root
fn attach(stack: &mut Vec<Element>, element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(element);
            None
        }
        None => Some(element),
    }
}
