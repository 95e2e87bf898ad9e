//! Owned XML element tree
//!
//! A small mutable tree used for editing dataset descriptors. Attribute
//! order and child order are preserved, so a descriptor that is read and
//! written back without edits keeps its layout.

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Nested element
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// Comment body, without the `<!--`/`-->` delimiters
    Comment(String),
    /// CDATA section body
    CData(String),
}

impl XmlNode {
    /// Borrow the element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Mutably borrow the element if this node is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// An XML element with its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Shorthand for `<att name="...">text</att>`
    pub fn att(name: &str, text: &str) -> Self {
        Element::new("att").with_attribute("name", name).with_text(text)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(pos).1)
    }

    /// Text content of this element
    ///
    /// Returns the concatenation of the direct text and CDATA children, or
    /// `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let mut found = false;
        let mut out = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) | XmlNode::CData(t) => {
                    found = true;
                    out.push_str(t);
                }
                _ => {}
            }
        }
        if found { Some(out) } else { None }
    }

    /// Replace the direct text content, leaving child elements in place
    pub fn set_text(&mut self, text: &str) {
        self.children
            .retain(|c| !matches!(c, XmlNode::Text(_) | XmlNode::CData(_)));
        self.children.insert(0, XmlNode::Text(text.to_string()));
    }

    /// Whether this is an `<att>` element with the given `name` attribute
    pub fn is_att(&self, name: &str) -> bool {
        self.name == "att" && self.attribute("name") == Some(name)
    }

    /// First direct child element with the given tag
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|e| e.name == name)
    }

    /// Direct child elements in order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Direct child elements with the given tag
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |e| e.name == name)
    }

    /// First direct child with the given tag, appending an empty one if absent
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        let pos = match self.element_position(|e| e.name == name) {
            Some(pos) => pos,
            None => {
                self.children.push(XmlNode::Element(Element::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[pos] {
            XmlNode::Element(e) => e,
            _ => unreachable!("position always refers to an element"),
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Index into `children` of the first direct child element matching `pred`
    pub fn element_position<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&Element) -> bool,
    {
        self.children
            .iter()
            .position(|c| c.as_element().map_or(false, |e| pred(e)))
    }

    /// Replace the child node at `index`, returning the old node
    pub fn replace_child_at(&mut self, index: usize, child: Element) -> Option<XmlNode> {
        let slot = self.children.get_mut(index)?;
        Some(std::mem::replace(slot, XmlNode::Element(child)))
    }

    /// Remove every direct child element matching `pred`; returns how many went
    pub fn remove_children_where<F>(&mut self, pred: F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let before = self.children.len();
        self.children
            .retain(|c| !c.as_element().map_or(false, |e| pred(e)));
        before - self.children.len()
    }

    /// Path of child indices to the first descendant matching `pred`
    ///
    /// The search is pre-order in document order and does not consider
    /// `self`.
    pub fn path_to_first<F>(&self, pred: &F) -> Option<Vec<usize>>
    where
        F: Fn(&Element) -> bool,
    {
        for (i, child) in self.children.iter().enumerate() {
            if let XmlNode::Element(e) = child {
                if pred(e) {
                    return Some(vec![i]);
                }
                if let Some(mut rest) = e.path_to_first(pred) {
                    rest.insert(0, i);
                    return Some(rest);
                }
            }
        }
        None
    }

    /// Paths to every descendant matching `pred`, in document order
    ///
    /// The children of a matching element are not searched.
    pub fn paths_to_all<F>(&self, pred: &F) -> Vec<Vec<usize>>
    where
        F: Fn(&Element) -> bool,
    {
        let mut paths = Vec::new();
        self.collect_paths(pred, &mut Vec::new(), &mut paths);
        paths
    }

    fn collect_paths<F>(&self, pred: &F, prefix: &mut Vec<usize>, paths: &mut Vec<Vec<usize>>)
    where
        F: Fn(&Element) -> bool,
    {
        for (i, child) in self.children.iter().enumerate() {
            if let XmlNode::Element(e) = child {
                prefix.push(i);
                if pred(e) {
                    paths.push(prefix.clone());
                } else {
                    e.collect_paths(pred, prefix, paths);
                }
                prefix.pop();
            }
        }
    }

    /// Element reached by following a path of child indices
    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        let mut current = self;
        for &i in path {
            current = current.children.get(i)?.as_element()?;
        }
        Some(current)
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &i in path {
            current = current.children.get_mut(i)?.as_element_mut()?;
        }
        Some(current)
    }

    /// First descendant matching `pred`
    pub fn find<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.path_to_first(&pred)?;
        self.at_path(&path)
    }

    pub fn find_mut<F>(&mut self, pred: F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.path_to_first(&pred)?;
        self.at_path_mut(&path)
    }

    /// First descendant `<att name="...">` with the given name
    pub fn find_att(&self, name: &str) -> Option<&Element> {
        self.find(|e| e.is_att(name))
    }

    pub fn find_att_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.find_mut(|e| e.is_att(name))
    }

    /// Insert `node` as the next sibling of the first descendant matching `pred`
    ///
    /// Before inserting, siblings matching `displaces` (other than the
    /// anchor itself) are removed. Gives the node back if no anchor exists.
    pub fn insert_after_first<F, D>(&mut self, pred: F, displaces: D, node: Element) -> Result<(), Element>
    where
        F: Fn(&Element) -> bool,
        D: Fn(&Element) -> bool,
    {
        let path = match self.path_to_first(&pred) {
            Some(p) => p,
            None => return Err(node),
        };
        let (&anchor, parent_path) = match path.split_last() {
            Some(split) => split,
            None => return Err(node),
        };
        let parent = match self.at_path_mut(parent_path) {
            Some(p) => p,
            None => return Err(node),
        };

        // Removing displaced siblings may shift the anchor, so track it by index
        let mut anchor_index = anchor;
        let mut i = 0;
        while i < parent.children.len() {
            let displaced = i != anchor_index
                && parent.children[i].as_element().map_or(false, |e| displaces(e));
            if displaced {
                parent.children.remove(i);
                if i < anchor_index {
                    anchor_index -= 1;
                }
            } else {
                i += 1;
            }
        }

        parent.children.insert(anchor_index + 1, XmlNode::Element(node));
        Ok(())
    }

    /// Replace the element at `path`, returning the old node
    pub fn replace_at_path(&mut self, path: &[usize], element: Element) -> Option<XmlNode> {
        let (&index, parent_path) = path.split_last()?;
        self.at_path_mut(parent_path)?.replace_child_at(index, element)
    }
}
