//! [`UiTree`] over the live DOM.

use lectern_core::ui::UiTree;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

/// The page document as a [`UiTree`]. Nodes are `web_sys::Element` handles.
#[derive(Debug, Clone)]
pub struct DomTree {
    document: Document,
}

impl DomTree {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl UiTree for DomTree {
    type Node = Element;

    fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector).ok())
    }

    fn find_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn find_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        elements(scope.query_selector_all(selector).ok())
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        if node.set_attribute(name, value).is_err() {
            tracing::debug!(name, "Rejected attribute write");
        }
    }

    fn remove_attr(&self, node: &Element, name: &str) {
        if node.remove_attribute(name).is_err() {
            tracing::debug!(name, "Rejected attribute removal");
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        if node.class_list().toggle_with_force(class, on).is_err() {
            tracing::debug!(class, on, "Rejected class toggle");
        }
    }

    fn clear_children(&self, node: &Element) {
        node.set_text_content(None);
    }

    fn append_element(&self, parent: &Element, tag: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        parent.append_child(&el).ok()?;
        Some(el)
    }

    fn append_text(&self, parent: &Element, text: &str) {
        let node = self.document.create_text_node(text);
        let _ = parent.append_child(&node);
    }
}
