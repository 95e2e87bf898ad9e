//! Tests for the element tree

extern crate std;

use crate::descriptor::element::{Element, XmlNode};

fn attributes() -> Element {
    Element::new("addAttributes")
        .with_child(Element::att("institution", "UBC"))
        .with_child(Element::att("license", "[standard]"))
        .with_child(Element::att("title", "A title"))
}

#[test]
fn test_set_attribute_keeps_position() {
    let mut e = Element::new("dataset")
        .with_attribute("type", "EDDGridFromNcFiles")
        .with_attribute("datasetID", "old");
    e.set_attribute("datasetID", "new");
    e.set_attribute("active", "true");

    let keys: Vec<&str> = e.attributes.iter().map(|(k, _)| k.as_str()).collect();
    std::assert_eq!(keys, vec!["type", "datasetID", "active"]);
    std::assert_eq!(e.attribute("datasetID"), Some("new"));
    std::assert_eq!(e.remove_attribute("active"), Some("true".to_string()));
    std::assert_eq!(e.attribute("active"), None);
}

#[test]
fn test_set_text_replaces_only_text() {
    let mut e = Element::new("sourceName")
        .with_child(Element::new("inner"));
    e.children.push(XmlNode::Text("old".to_string()));
    e.set_text("new");

    std::assert_eq!(e.text(), Some("new".to_string()));
    std::assert_eq!(e.children.len(), 2);
    std::assert!(e.child("inner").is_some());
    std::assert_eq!(Element::new("empty").text(), None);
}

#[test]
fn test_find_att_is_preorder() {
    let root = Element::new("dataset")
        .with_child(attributes())
        .with_child(
            Element::new("dataVariable")
                .with_child(Element::new("addAttributes").with_child(Element::att("title", "inner"))),
        );

    let title = root.find_att("title").unwrap();
    std::assert_eq!(title.text(), Some("A title".to_string()));
    std::assert!(root.find_att("missing").is_none());
}

#[test]
fn test_insert_after_first() {
    let mut root = Element::new("dataset").with_child(attributes());

    let result = root.insert_after_first(
        |e| e.is_att("institution"),
        |e| e.is_att("institution_fullname"),
        Element::att("institution_fullname", "University of British Columbia"),
    );
    std::assert!(result.is_ok());

    let names: Vec<&str> = root.child("addAttributes").unwrap()
        .child_elements()
        .filter_map(|a| a.attribute("name"))
        .collect();
    std::assert_eq!(names, vec!["institution", "institution_fullname", "license", "title"]);
}

#[test]
fn test_insert_after_displaces_existing_sibling() {
    let mut root = Element::new("dataset").with_child(
        Element::new("addAttributes")
            .with_child(Element::att("project", "stale"))
            .with_child(Element::att("title", "A title")),
    );

    root.insert_after_first(|e| e.is_att("title"), |e| e.is_att("project"), Element::att("project", "fresh"))
        .unwrap();

    let attrs = root.child("addAttributes").unwrap();
    let names: Vec<&str> = attrs.child_elements().filter_map(|a| a.attribute("name")).collect();
    std::assert_eq!(names, vec!["title", "project"]);
    std::assert_eq!(attrs.find_att("project").unwrap().text(), Some("fresh".to_string()));
}

#[test]
fn test_insert_after_missing_anchor_returns_node() {
    let mut root = Element::new("dataset").with_child(attributes());
    let before = root.clone();

    let result = root.insert_after_first(|e| e.is_att("nope"), |_| false, Element::att("x", "y"));
    std::assert_eq!(result.unwrap_err().attribute("name"), Some("x"));
    std::assert_eq!(root, before);
}

#[test]
fn test_child_or_insert() {
    let mut variable = Element::new("dataVariable").with_child(Element::new("sourceName").with_text("e3t"));
    variable.child_or_insert("addAttributes").push_child(Element::att("a", "1"));
    variable.child_or_insert("addAttributes").push_child(Element::att("b", "2"));

    std::assert_eq!(variable.children_named("addAttributes").count(), 1);
    std::assert_eq!(variable.child("addAttributes").unwrap().children.len(), 2);
}

#[test]
fn test_replace_and_remove_children() {
    let mut attrs = attributes();
    let removed = attrs.remove_children_where(|e| e.is_att("license") || e.is_att("title"));
    std::assert_eq!(removed, 2);

    let old = attrs.replace_child_at(0, Element::att("institution", "SFU"));
    std::assert!(matches!(old, Some(XmlNode::Element(ref e)) if e.text() == Some("UBC".to_string())));
    std::assert!(attrs.replace_child_at(5, Element::new("x")).is_none());
}

#[test]
fn test_paths_to_all_reaches_nested_elements() {
    let mut root = Element::new("dataset")
        .with_child(Element::new("axisVariable").with_child(Element::new("sourceName").with_text("a")))
        .with_child(
            Element::new("dataset")
                .with_child(Element::new("axisVariable").with_child(Element::new("sourceName").with_text("b"))),
        );

    let paths = root.paths_to_all(&|e: &Element| e.name == "axisVariable");
    std::assert_eq!(paths, vec![vec![0], vec![1, 0]]);

    let old = root.replace_at_path(&paths[1], Element::new("axisVariable"));
    std::assert!(matches!(old, Some(XmlNode::Element(ref e)) if e.child("sourceName").is_some()));
    std::assert!(root.at_path(&[1, 0]).unwrap().children.is_empty());
    std::assert!(root.replace_at_path(&[], Element::new("x")).is_none());
}
