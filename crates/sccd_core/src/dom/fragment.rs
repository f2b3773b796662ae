//! Owned markup fragments produced by renderers.
//!
//! # Responsibility
//! - Give renderers a side-effect free way to describe markup.
//! - Serialize fragments to HTML with escaping applied to text and attributes.
//!
//! # Invariants
//! - `Node::Text` and attribute values are always escaped on output.
//! - `Node::Raw` is emitted verbatim; it is reserved for content fields that
//!   carry authored HTML.
//! - Class names are stored split on whitespace and never contain blanks.

use std::collections::BTreeMap;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// One node of a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

/// Element description used by renderers and page shells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds every whitespace-separated class in `classes`.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|existing| existing == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.style.iter_mut().find(|(name, _)| name == property) {
            Some(entry) => entry.1 = value,
            None => self.style.push((property.to_string(), value)),
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Appends an escaped text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends authored HTML verbatim.
    pub fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Raw(html.into()));
        self
    }

    /// Appends every node of a fragment.
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.children.extend(fragment.nodes);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

/// Ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn extend(&mut self, other: Fragment) {
        self.nodes.extend(other.nodes);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node);
        }
        out
    }
}

impl<N: Into<Node>> FromIterator<N> for Fragment {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub(crate) fn write_open_tag(
    out: &mut String,
    tag: &str,
    id: Option<&str>,
    classes: &[String],
    attrs: &BTreeMap<String, String>,
    style: &[(String, String)],
) {
    out.push('<');
    out.push_str(tag);
    if let Some(id) = id {
        out.push_str(&format!(" id=\"{}\"", escape_html(id)));
    }
    if !classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
    }
    for (name, value) in attrs {
        out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
    }
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_html(&style_string(style))));
    }
    out.push('>');
}

pub(crate) fn style_string(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(html) => out.push_str(html),
    }
}

fn write_element(out: &mut String, element: &Element) {
    write_open_tag(
        out,
        &element.tag,
        element.id.as_deref(),
        &element.classes,
        &element.attrs,
        &element.style,
    );
    if is_void_tag(&element.tag) {
        return;
    }
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str(&format!("</{}>", element.tag));
}
