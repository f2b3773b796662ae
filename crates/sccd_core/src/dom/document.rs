//! In-memory page document.
//!
//! # Responsibility
//! - Hold the live node tree a page works against (arena of nodes).
//! - Provide the element queries and mutations the binders need: id lookup,
//!   class queries, `closest`, sibling navigation, class/attribute/style edits.
//! - Own the click listener table and dispatch bubbling click events.
//!
//! # Invariants
//! - Only nodes reachable from `body()` are attached; queries never return
//!   detached nodes.
//! - Detaching a subtree drops every listener registered on it.
//! - `NodeId` values are never reused within one document. Detached slots
//!   are not reclaimed, so the arena grows with every re-mount for the
//!   life of the page; listeners holding a stale id see a detached node,
//!   never a different one.

use crate::dom::fragment::{is_void_tag, write_open_tag, Element, Fragment, Node};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Stable handle of one node inside a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Click event delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Node the click originated on.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: NodeId,
}

/// Click listener. Listeners receive the document mutably and run to
/// completion before the next listener.
pub type ClickHandler = Rc<dyn Fn(&mut Document, &ClickEvent)>;

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(ElementData),
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

/// Single-threaded document tree with a `body` root.
pub struct Document {
    slots: Vec<Slot>,
    body: NodeId,
    title: String,
    listeners: HashMap<NodeId, Vec<ClickHandler>>,
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("title", &self.title)
            .field("nodes", &self.slots.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document holding only `<body>`.
    pub fn new() -> Self {
        let body = Slot {
            data: NodeData::Element(ElementData {
                tag: "body".to_string(),
                id: None,
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                style: Vec::new(),
            }),
            parent: None,
            children: Vec::new(),
            attached: true,
        };
        Self {
            slots: vec![body],
            body: NodeId(0),
            title: String::new(),
            listeners: HashMap::new(),
        }
    }

    /// Creates a document whose body holds `shell`.
    pub fn from_fragment(shell: Fragment) -> Self {
        let mut doc = Self::new();
        let body = doc.body();
        doc.append_fragment(body, shell);
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ---------------------------------------------------------------
    //  Tree construction
    // ---------------------------------------------------------------

    /// Appends one node (and its subtree) as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let attached = self.slot(parent).attached;
        let id = self.insert(node, Some(parent), attached);
        self.slot_mut(parent).children.push(id);
        id
    }

    /// Appends every node of `fragment` under `parent`, returning new ids.
    pub fn append_fragment(&mut self, parent: NodeId, fragment: Fragment) -> Vec<NodeId> {
        fragment
            .into_nodes()
            .into_iter()
            .map(|node| self.append(parent, node))
            .collect()
    }

    /// Removes all children of `parent` and appends `fragment` instead.
    pub fn replace_children(&mut self, parent: NodeId, fragment: Fragment) -> Vec<NodeId> {
        self.clear_children(parent);
        self.append_fragment(parent, fragment)
    }

    /// Detaches every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.slot_mut(node).children);
        for child in children {
            self.detach_subtree(child);
        }
    }

    /// Replaces the children of `node` with one text node.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.replace_children(node, Fragment::new().with(Node::Text(text.into())));
    }

    /// Replaces the children of `node` with authored HTML.
    pub fn set_inner_raw(&mut self, node: NodeId, html: impl Into<String>) {
        self.replace_children(node, Fragment::new().with(Node::Raw(html.into())));
    }

    fn insert(&mut self, node: Node, parent: Option<NodeId>, attached: bool) -> NodeId {
        let id = NodeId(self.slots.len());
        let (data, children) = match node {
            Node::Element(element) => {
                let Element {
                    tag,
                    id: element_id,
                    classes,
                    attrs,
                    style,
                    children,
                } = element;
                (
                    NodeData::Element(ElementData {
                        tag,
                        id: element_id,
                        classes,
                        attrs,
                        style,
                    }),
                    children,
                )
            }
            Node::Text(text) => (NodeData::Text(text), Vec::new()),
            Node::Raw(html) => (NodeData::Raw(html), Vec::new()),
        };
        self.slots.push(Slot {
            data,
            parent,
            children: Vec::new(),
            attached,
        });
        for child in children {
            let child_id = self.insert(child, Some(id), attached);
            self.slot_mut(id).children.push(child_id);
        }
        id
    }

    fn detach_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            self.listeners.remove(&current);
            let slot = self.slot_mut(current);
            slot.attached = false;
            stack.extend(slot.children.iter().copied());
        }
        self.slot_mut(node).parent = None;
    }

    fn slot(&self, node: NodeId) -> &Slot {
        &self.slots[node.0]
    }

    fn slot_mut(&mut self, node: NodeId) -> &mut Slot {
        &mut self.slots[node.0]
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.slot(node).data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.slot_mut(node).data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    // ---------------------------------------------------------------
    //  Queries
    // ---------------------------------------------------------------

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.slot(node).attached
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag.as_str())
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|element| element.id.as_deref())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).parent
    }

    /// Element children of `node` in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.slot(node)
            .children
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// Attached element descendants of `scope` in document order.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_attached(scope) {
            return out;
        }
        let mut stack: Vec<NodeId> = self.slot(scope).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.is_element(current) {
                out.push(current);
            }
            stack.extend(self.slot(current).children.iter().rev().copied());
        }
        out
    }

    /// First attached element carrying `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.element_id(*node) == Some(id))
    }

    /// Elements under `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    /// Elements anywhere in the body carrying `class`.
    pub fn query_class_all(&self, class: &str) -> Vec<NodeId> {
        self.query_class(self.body, class)
    }

    pub fn query_first_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.has_class(*node, class))
    }

    /// First element under `scope` with the given tag name.
    pub fn query_first_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.tag(*node) == Some(tag))
    }

    /// Elements under `scope` with `attr` equal to `value`.
    pub fn query_attr(&self, scope: NodeId, attr: &str, value: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.attr(*node, attr) == Some(value))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` carrying `class`.
    pub fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = &self.slot(parent).children;
        let position = siblings.iter().position(|child| *child == node)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|sibling| self.is_element(*sibling))
    }

    /// Whether `node` is the first element child of its parent.
    pub fn is_first_element_child(&self, node: NodeId) -> bool {
        self.parent(node)
            .and_then(|parent| self.element_children(parent).first().copied())
            == Some(node)
    }

    // ---------------------------------------------------------------
    //  Classes, attributes, style
    // ---------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|element| element.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.element(node)
            .map(|element| element.classes.clone())
            .unwrap_or_default()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.classes.iter().any(|existing| existing == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.retain(|existing| existing != class);
        }
    }

    /// Toggles `class`, or forces it on/off when `force` is set. Returns
    /// whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: Option<bool>) -> bool {
        let present = self.has_class(node, class);
        let wanted = force.unwrap_or(!present);
        if wanted {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        wanted
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.remove(name);
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|element| {
            element
                .style
                .iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value.as_str())
        })
    }

    /// Sets one inline style property. An empty value removes it, matching
    /// `element.style.x = ''` semantics.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.remove_style(node, property);
            return;
        }
        if let Some(element) = self.element_mut(node) {
            match element.style.iter_mut().find(|(name, _)| name == property) {
                Some(entry) => entry.1 = value,
                None => element.style.push((property.to_string(), value)),
            }
        }
    }

    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(element) = self.element_mut(node) {
            element.style.retain(|(name, _)| name != property);
        }
    }

    /// Whether `node` has not been hidden through `display: none`.
    pub fn is_shown(&self, node: NodeId) -> bool {
        self.style(node, "display") != Some("none")
    }

    /// Whether `node` and every ancestor are shown and not `.hidden`.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(candidate) = current {
            if !self.is_shown(candidate) || self.has_class(candidate, "hidden") {
                return false;
            }
            current = self.parent(candidate);
        }
        true
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.slot(node).data {
            NodeData::Text(text) | NodeData::Raw(text) => out.push_str(text),
            NodeData::Element(_) => {
                for child in &self.slot(node).children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    // ---------------------------------------------------------------
    //  Listeners
    // ---------------------------------------------------------------

    /// Registers a click listener on `node`.
    pub fn add_listener(&mut self, node: NodeId, handler: ClickHandler) {
        if !self.is_attached(node) {
            return;
        }
        self.listeners.entry(node).or_default().push(handler);
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map(Vec::len).unwrap_or(0)
    }

    /// Total listeners registered on attached nodes.
    pub fn total_listeners(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Dispatches a click on `target`, bubbling towards `body`.
    ///
    /// Listeners on nodes detached by an earlier listener are skipped.
    pub fn dispatch_click(&mut self, target: NodeId) {
        if !self.is_attached(target) {
            return;
        }
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        for node in path {
            if !self.is_attached(node) {
                continue;
            }
            let handlers = self.listeners.get(&node).cloned().unwrap_or_default();
            for handler in handlers {
                let event = ClickEvent {
                    target,
                    current_target: node,
                };
                handler(self, &event);
            }
        }
    }

    // ---------------------------------------------------------------
    //  Serialization
    // ---------------------------------------------------------------

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in &self.slot(node).children {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Serializes the whole body.
    pub fn to_html(&self) -> String {
        self.outer_html(self.body)
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.slot(node).data {
            NodeData::Text(text) => out.push_str(&crate::dom::fragment::escape_html(text)),
            NodeData::Raw(html) => out.push_str(html),
            NodeData::Element(element) => {
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
                for child in &self.slot(node).children {
                    self.write_node(*child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::dom::fragment::{Element, Fragment};
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample() -> Document {
        Document::from_fragment(
            Fragment::new().with(
                Element::new("div").id("list").class("group").children([
                    Element::new("div").class("item").attr("data-category", "a"),
                    Element::new("div")
                        .class("item")
                        .attr("data-category", "b")
                        .child(Element::new("span").class("label").text("B")),
                ]),
            ),
        )
    }

    #[test]
    fn finds_elements_by_id_and_class_in_document_order() {
        let doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        let items = doc.query_class(list, "item");
        assert_eq!(items.len(), 2);
        assert_eq!(doc.attr(items[0], "data-category"), Some("a"));
        assert_eq!(doc.next_element_sibling(items[0]), Some(items[1]));
        assert!(doc.is_first_element_child(items[0]));
    }

    #[test]
    fn closest_walks_up_inclusive() {
        let doc = sample();
        let label = doc.query_class_all("label")[0];
        let group = doc.closest_class(label, "group").expect("group ancestor");
        assert_eq!(doc.element_id(group), Some("list"));
        assert_eq!(doc.closest_class(group, "group"), Some(group));
    }

    #[test]
    fn replace_children_detaches_old_nodes_and_listeners() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        let old_item = doc.query_class(list, "item")[0];
        doc.add_listener(old_item, Rc::new(|_, _| {}));
        assert_eq!(doc.total_listeners(), 1);

        doc.replace_children(list, Fragment::new().with(Element::new("p").text("new")));

        assert!(!doc.is_attached(old_item));
        assert_eq!(doc.total_listeners(), 0);
        assert!(doc.query_class_all("item").is_empty());
        assert_eq!(doc.inner_html(list), "<p>new</p>");
    }

    #[test]
    fn remounting_allocates_fresh_ids() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        let old: Vec<_> = doc.descendants(list);
        let first = doc.replace_children(list, Fragment::new().with(Element::new("p").class("item")));
        let second = doc.replace_children(list, Fragment::new().with(Element::new("p").class("item")));

        let newest_old = old.iter().max().copied().expect("old nodes");
        assert!(first.iter().all(|id| *id > newest_old));
        assert!(second.iter().all(|id| first.iter().all(|earlier| id > earlier)));
        assert!(old.iter().chain(&first).all(|id| !doc.is_attached(*id)));
        assert_eq!(doc.query_class_all("item"), second);
    }

    #[test]
    fn click_bubbles_to_ancestors_with_target() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        let label = doc.query_class_all("label")[0];
        let seen = Rc::new(Cell::new(0));
        let seen_in_handler = Rc::clone(&seen);
        doc.add_listener(
            list,
            Rc::new(move |_, event| {
                assert_ne!(event.target, event.current_target);
                seen_in_handler.set(seen_in_handler.get() + 1);
            }),
        );
        doc.dispatch_click(label);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn style_and_visibility() {
        let mut doc = sample();
        let label = doc.query_class_all("label")[0];
        assert!(doc.is_rendered(label));
        let item = doc.parent(label).expect("label parent");
        doc.set_style(item, "display", "none");
        assert!(!doc.is_rendered(label));
        doc.set_style(item, "display", "");
        assert_eq!(doc.style(item, "display"), None);
        doc.add_class(item, "hidden");
        assert!(!doc.is_rendered(label));
    }

    #[test]
    fn toggle_class_reports_final_state() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        assert!(doc.toggle_class(list, "active", None));
        assert!(!doc.toggle_class(list, "active", None));
        assert!(doc.toggle_class(list, "active", Some(true)));
        assert!(doc.toggle_class(list, "active", Some(true)));
    }

    #[test]
    fn text_content_and_set_text() {
        let mut doc = sample();
        let list = doc.get_element_by_id("list").expect("list exists");
        assert_eq!(doc.text_content(list), "B");
        doc.set_text(list, "<x>");
        assert_eq!(doc.inner_html(list), "&lt;x&gt;");
    }
}
