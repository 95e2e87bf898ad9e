//! Tests for reading and writing descriptors

use crate::descriptor::element::{Element, XmlNode};
use crate::descriptor::errors::ErddapError;
use crate::descriptor::reader::{parse_document, parse_fragment};
use crate::descriptor::writer::{to_document_bytes, to_fragment_string};
use crate::descriptor::tests::test_utils::{grid_fragment, GRID_FRAGMENT};

#[test]
fn test_parse_grid_fragment() {
    let root = grid_fragment();
    assert_eq!(root.name, "dataset");
    assert_eq!(root.attribute("datasetID"), Some("generated_id"));
    assert_eq!(root.children_named("axisVariable").count(), 4);
    assert_eq!(root.children_named("dataVariable").count(), 3);
    // The commented-out source attributes survive as a comment node
    assert!(root.children.iter().any(|c| matches!(c, XmlNode::Comment(body) if body.contains("sourceAttributes"))));
}

#[test]
fn test_blank_text_is_dropped() {
    let root = parse_fragment("<a>\n    <b>  kept  </b>\n</a>").unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.child("b").unwrap().text(), Some("  kept  ".to_string()));
}

#[test]
fn test_entities_are_unescaped_and_escaped_again() {
    let root = parse_fragment(r#"<att name="a&amp;b">x &lt; y &amp; z</att>"#).unwrap();
    assert_eq!(root.attribute("name"), Some("a&b"));
    assert_eq!(root.text(), Some("x < y & z".to_string()));

    let out = to_fragment_string(&root).unwrap();
    assert_eq!(out, "<att name=\"a&amp;b\">x &lt; y &amp; z</att>\n");
}

#[test]
fn test_round_trip_is_stable() {
    let first = to_fragment_string(&grid_fragment()).unwrap();
    let reparsed = parse_fragment(&first).unwrap();
    assert_eq!(reparsed, parse_fragment(GRID_FRAGMENT).unwrap());
    assert_eq!(to_fragment_string(&reparsed).unwrap(), first);
}

#[test]
fn test_fragment_is_indented() {
    let root = Element::new("dataset")
        .with_attribute("datasetID", "ds")
        .with_child(Element::new("addAttributes").with_child(Element::att("title", "T")))
        .with_child(Element::new("empty"));
    let out = to_fragment_string(&root).unwrap();
    assert_eq!(
        out,
        "<dataset datasetID=\"ds\">\n  <addAttributes>\n    <att name=\"title\">T</att>\n  </addAttributes>\n  <empty/>\n</dataset>\n"
    );
}

#[test]
fn test_document_is_latin1_with_declaration() {
    let document = parse_document(
        "<?xml version=\"1.0\"?>\n<!-- master -->\n<erddapDatasets><dataset datasetID=\"a\">caf\u{e9} \u{2013}</dataset></erddapDatasets>",
    )
    .unwrap();
    assert_eq!(document.prolog.len(), 1);

    let bytes = to_document_bytes(&document).unwrap();
    let head = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>";
    assert!(bytes.starts_with(head));
    assert!(bytes.windows(4).any(|w| w == b"caf\xe9"));
    assert!(bytes.windows(7).any(|w| w == b"&#8211;"));
}

#[test]
fn test_malformed_input_is_an_error() {
    assert!(matches!(parse_fragment("<a><b></a>"), Err(ErddapError::XmlError(_))));
    assert!(matches!(parse_fragment("<a>"), Err(ErddapError::XmlError(_))));
    assert!(matches!(parse_fragment("   "), Err(ErddapError::XmlError(_))));
}
