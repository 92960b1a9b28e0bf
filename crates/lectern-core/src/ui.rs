//! The page abstraction the viewer reads and mutates.
//!
//! [`UiTree`] is deliberately DOM-shaped: nodes are cheap handles, every
//! mutation takes `&self`, and lookups take CSS selectors from
//! [`Selectors`](crate::config::Selectors). The browser build implements it
//! over `web_sys::Element`; [`MemoryTree`] is a small arena implementation used
//! by tests and the CLI preview.

use std::cell::RefCell;

/// A mutable element tree with selector lookups.
pub trait UiTree {
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// First element in document order matching `selector`.
    fn find(&self, selector: &str) -> Option<Self::Node>;

    /// All elements in document order matching `selector`.
    fn find_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn find_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// All descendants of `scope` matching `selector`.
    fn find_all_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attr(&self, node: &Self::Node, name: &str);

    /// Concatenated text of the node and its descendants.
    fn text(&self, node: &Self::Node) -> String;

    /// Replace all children with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add (`on == true`) or remove a class.
    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    fn clear_children(&self, node: &Self::Node);

    /// Create an element with `tag` as the last child of `parent`.
    fn append_element(&self, parent: &Self::Node, tag: &str) -> Option<Self::Node>;

    fn append_text(&self, parent: &Self::Node, text: &str);
}

// ── Selector matching ─────────────────────────────────────────────────

/// One compound simple selector, e.g. `a.resource-link` or `#viewer-title`.
#[derive(Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

/// Parse a comma-separated list of compound selectors.
///
/// Combinators and attribute selectors are not supported; a compound that
/// contains one never matches.
fn parse_selector(selector: &str) -> Vec<Option<Compound>> {
    selector.split(',').map(|part| parse_compound(part.trim())).collect()
}

fn parse_compound(part: &str) -> Option<Compound> {
    if part.is_empty() || part.contains(|c: char| c.is_whitespace() || "[]>+~:*".contains(c)) {
        return None;
    }

    let mut compound = Compound::default();
    let mut rest = part;

    let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
    if tag_end > 0 {
        compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() {
            return None;
        }
        match marker {
            '.' => compound.classes.push(name.to_string()),
            _ => compound.id = Some(name.to_string()),
        }
        rest = &body[end..];
    }

    Some(compound)
}

// ── In-memory tree ────────────────────────────────────────────────────

/// Handle to a node in a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn element(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    fn matches(&self, compound: &Compound) -> bool {
        if self.is_text() {
            return false;
        }
        if compound.tag.as_deref().is_some_and(|t| t != self.tag) {
            return false;
        }
        if compound.id.as_deref().is_some_and(|id| self.attr("id") != Some(id)) {
            return false;
        }
        compound
            .classes
            .iter()
            .all(|c| self.classes().any(|have| have == c.as_str()))
    }
}

/// Arena-backed element tree.
///
/// Node 0 is the document root. Cleared children stay in the arena but are
/// detached, so they no longer show up in lookups.
#[derive(Debug)]
pub struct MemoryTree {
    nodes: RefCell<Vec<NodeData>>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData::element("#document", None)]),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element with attributes under `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        let mut data = NodeData::element(tag, Some(parent));
        data.attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        nodes.push(data);
        nodes[parent.0].children.push(id);
        id
    }

    /// Append an element containing a single text node.
    pub fn add_with_text(
        &self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let id = self.add(parent, tag, attrs);
        self.append_text(&id, text);
        id
    }

    /// Tag name of a node (`#text` for text nodes).
    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    /// Element children of `node`, skipping text nodes.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(|c| !nodes[c.0].is_text())
            .collect()
    }

    /// Serialize a subtree as HTML, for previews and assertions.
    pub fn outer_html(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        write_html(&nodes, node, &mut out);
        out
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &[Option<Compound>]) -> bool {
        let nodes = self.nodes.borrow();
        selector
            .iter()
            .flatten()
            .any(|compound| nodes[node.0].matches(compound))
    }

    fn filter_matching(&self, candidates: Vec<NodeId>, selector: &str) -> Vec<NodeId> {
        let parsed = parse_selector(selector);
        candidates
            .into_iter()
            .filter(|id| self.matches(*id, &parsed))
            .collect()
    }
}

fn write_html(nodes: &[NodeData], id: NodeId, out: &mut String) {
    let node = &nodes[id.0];
    if node.is_text() {
        out.push_str(&escape_html(&node.text));
        return;
    }
    let is_root = id.0 == 0;
    if !is_root {
        out.push('<');
        out.push_str(&node.tag);
        for (k, v) in &node.attrs {
            out.push_str(&format!(" {k}=\"{}\"", escape_html(v)));
        }
        out.push('>');
    }
    for child in &node.children {
        write_html(nodes, *child, out);
    }
    if !is_root {
        out.push_str(&format!("</{}>", node.tag));
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl UiTree for MemoryTree {
    type Node = NodeId;

    fn find(&self, selector: &str) -> Option<NodeId> {
        self.find_all(selector).into_iter().next()
    }

    fn find_all(&self, selector: &str) -> Vec<NodeId> {
        self.find_all_within(&self.root(), selector)
    }

    fn find_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.find_all_within(scope, selector).into_iter().next()
    }

    fn find_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.filter_matching(self.descendants(*scope), selector)
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.matches(id, &parsed) {
                return Some(id);
            }
            current = self.nodes.borrow()[id.0].parent;
        }
        None
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attr(name).map(str::to_string)
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let attrs = &mut nodes[node.0].attrs;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attr(&self, node: &NodeId, name: &str) {
        self.nodes.borrow_mut()[node.0].attrs.retain(|(k, _)| k != name);
    }

    fn text(&self, node: &NodeId) -> String {
        let descendants = self.descendants(*node);
        let nodes = self.nodes.borrow();
        if nodes[node.0].is_text() {
            return nodes[node.0].text.clone();
        }
        descendants
            .into_iter()
            .filter(|id| nodes[id.0].is_text())
            .map(|id| nodes[id.0].text.as_str())
            .collect()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.clear_children(node);
        self.append_text(node, text);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes().any(|c| c == class)
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) {
        let mut classes: Vec<String> = self.nodes.borrow()[node.0]
            .classes()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if on {
            classes.push(class.to_string());
        }
        self.set_attr(node, "class", &classes.join(" "));
    }

    fn clear_children(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[node.0].children);
        for child in children {
            nodes[child.0].parent = None;
        }
    }

    fn append_element(&self, parent: &NodeId, tag: &str) -> Option<NodeId> {
        Some(self.add(*parent, tag, &[]))
    }

    fn append_text(&self, parent: &NodeId, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        let mut data = NodeData::element(TEXT_TAG, Some(*parent));
        data.text = text.to_string();
        nodes.push(data);
        nodes[parent.0].children.push(id);
    }
}
