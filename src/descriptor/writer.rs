//! XML serialisation of the element tree
//!
//! Fragments are written pretty-printed without a declaration, ready to be
//! exported on their own. Whole documents carry an ISO-8859-1 declaration,
//! matching what ERDDAP expects of `datasets.xml`.

use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::descriptor::element::{Element, XmlNode};
use crate::descriptor::errors::{ErddapError, ErddapResult};
use crate::descriptor::reader::XmlDocument;
use crate::utils::encoding_utils;

/// Declared encoding of the master configuration file
pub const DOCUMENT_ENCODING: &str = "ISO-8859-1";

const INDENT_SIZE: usize = 2;

/// Serialise an element as an indented fragment
pub fn to_fragment_string(root: &Element) -> ErddapResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    write_element(&mut writer, root)?;
    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| ErddapError::XmlError(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Serialise a whole document as ISO-8859-1 bytes with an XML declaration
pub fn to_document_bytes(document: &XmlDocument) -> ErddapResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some(DOCUMENT_ENCODING), None)))
        .map_err(|e| ErddapError::XmlError(e.to_string()))?;

    for node in &document.prolog {
        write_node(&mut writer, node)?;
    }
    write_element(&mut writer, &document.root)?;

    let utf8 = String::from_utf8(writer.into_inner())
        .map_err(|e| ErddapError::XmlError(e.to_string()))?;
    let mut bytes = encoding_utils::encode_latin1(&utf8);
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write a fragment file
pub fn write_fragment<P: AsRef<Path>>(path: P, root: &Element) -> ErddapResult<()> {
    let path = path.as_ref();
    let content = to_fragment_string(root)?;
    fs::write(path, content)?;
    debug!("Wrote dataset fragment to {}", path.display());
    Ok(())
}

/// Rewrite a document file wholesale
pub fn write_document<P: AsRef<Path>>(path: P, document: &XmlDocument) -> ErddapResult<()> {
    let path = path.as_ref();
    let bytes = to_document_bytes(document)?;
    fs::write(path, &bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> ErddapResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> ErddapResult<()> {
    match node {
        XmlNode::Element(e) => write_element(writer, e),
        XmlNode::Text(t) => emit(writer, Event::Text(BytesText::from_escaped(partial_escape(t.as_str())))),
        XmlNode::Comment(c) => emit(writer, Event::Comment(BytesText::from_escaped(c.as_str()))),
        XmlNode::CData(c) => emit(writer, Event::CData(BytesCData::new(c.as_str()))),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> ErddapResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ErddapError::XmlError(e.to_string()))
}
