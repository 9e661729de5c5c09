//! Source tree adapter
//!
//! We parse with `html5ever` into a `markup5ever_rcdom` DOM, then copy it into a small owned
//! tree of [`Node`]s. The converter and custom block handlers only ever see the owned tree,
//! which is immutable and `Send + Sync`.
//!
//! Comments, doctypes and processing instructions are dropped during the copy. Tag and
//! attribute names are already lowercased by the parser.

use crate::error::{ConvertError, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Default ceiling on element nesting, shared by the parser adapter and the converter.
///
/// Each nested block costs a few stack frames in the resolver, so this stays low enough for a
/// debug build on a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A node of the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// An element with its attributes (in source order) and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }

    /// Depth-first search of the descendants (not including `self`).
    pub fn find_descendant(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        find_in(&self.children, predicate)
    }
}

/// A parsed document: the children of the parser's document node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    children: Vec<Node>,
}

impl Document {
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn find_descendant(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        find_in(&self.children, predicate)
    }

    /// First element with the given tag, in document order.
    pub fn find_element(&self, tag: &str) -> Option<&Element> {
        self.find_descendant(&|element| element.tag() == tag)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }
}

/// Parse HTML with the default depth ceiling.
pub fn parse(html: &str) -> Result<Document> {
    parse_with_limit(html, DEFAULT_MAX_DEPTH)
}

/// Parse HTML, failing if elements nest deeper than `max_depth`.
pub fn parse_with_limit(html: &str, max_depth: usize) -> Result<Document> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let children = adapt_children(&dom.document, 0, max_depth)?;
    Ok(Document { children })
}

fn adapt_children(handle: &Handle, depth: usize, max_depth: usize) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    for child in handle.children.borrow().iter() {
        if let Some(node) = adapt(child, depth, max_depth)? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

fn adapt(handle: &Handle, depth: usize, max_depth: usize) -> Result<Option<Node>> {
    match &handle.data {
        NodeData::Text { contents } => Ok(Some(Node::Text(contents.borrow().to_string()))),
        NodeData::Element { name, attrs, .. } => {
            if depth >= max_depth {
                return Err(ConvertError::DepthLimitExceeded { limit: max_depth });
            }
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Ok(Some(Node::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children: adapt_children(handle, depth + 1, max_depth)?,
            })))
        }
        _ => Ok(None),
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

fn find_in<'a>(nodes: &'a [Node], predicate: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
    for element in nodes.iter().filter_map(Node::as_element) {
        if predicate(element) {
            return Some(element);
        }
        if let Some(found) = find_in(&element.children, predicate) {
            return Some(found);
        }
    }
    None
}
