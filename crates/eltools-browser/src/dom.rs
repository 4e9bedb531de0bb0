//! web-sys implementations of the core DOM traits.
//!
//! `BrowserNode` wraps a `web_sys::Element` handle; equality is the
//! JavaScript reference equality of the wrapped object, matching the
//! identity semantics the core traits require.

use eltools_core::{DomDocument, DomNode};
use smol_str::SmolStr;

/// Non-owning handle to a live browser element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserNode(pub web_sys::Element);

impl BrowserNode {
    pub fn element(&self) -> &web_sys::Element {
        &self.0
    }
}

impl DomNode for BrowserNode {
    fn tag_name(&self) -> SmolStr {
        // tag_name() is already uppercase for HTML documents.
        SmolStr::new(self.0.tag_name())
    }

    fn id(&self) -> Option<SmolStr> {
        let id = self.0.id();
        if id.is_empty() {
            None
        } else {
            Some(SmolStr::new(id))
        }
    }

    fn has_parent(&self) -> bool {
        self.0.parent_node().is_some()
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(BrowserNode)
    }

    fn is_document_boundary(&self) -> bool {
        matches!(self.0.tag_name().as_str(), "HTML" | "BODY")
    }

    fn sibling_position(&self) -> usize {
        let mut position = 1;
        let mut current = self.0.previous_element_sibling();
        while let Some(sibling) = current {
            position += 1;
            current = sibling.previous_element_sibling();
        }
        position
    }

    fn same_tag_position(&self) -> Option<(usize, usize)> {
        self.0.parent_element()?;
        let tag = self.0.tag_name();

        let mut index = 1;
        let mut current = self.0.previous_element_sibling();
        while let Some(sibling) = current {
            if sibling.tag_name() == tag {
                index += 1;
            }
            current = sibling.previous_element_sibling();
        }

        let mut count = index;
        let mut current = self.0.next_element_sibling();
        while let Some(sibling) = current {
            if sibling.tag_name() == tag {
                count += 1;
            }
            current = sibling.next_element_sibling();
        }

        Some((index, count))
    }

    fn classes(&self) -> Vec<SmolStr> {
        let list = self.0.class_list();
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(SmolStr::new)
            .collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            tracing::warn!(class, "classList.add failed: {e:?}");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().remove_1(class) {
            tracing::warn!(class, "classList.remove failed: {e:?}");
        }
    }

    fn set_class_string(&self, value: &str) {
        self.0.set_class_name(value);
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn outer_html(&self) -> String {
        self.0.outer_html()
    }

    fn attributes(&self) -> Vec<(SmolStr, String)> {
        self.0
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| {
                self.0
                    .get_attribute(&name)
                    .map(|value| (SmolStr::new(name), value))
            })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            tracing::warn!(name, "setAttribute failed: {e:?}");
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(e) = self.0.remove_attribute(name) {
            tracing::warn!(name, "removeAttribute failed: {e:?}");
        }
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn in_container(&self, class: &str) -> bool {
        self.0
            .closest(&format!(".{class}"))
            .ok()
            .flatten()
            .is_some()
    }
}

/// A browser document resolving selectors through `querySelector`.
#[derive(Clone, Debug)]
pub struct BrowserDocument(pub web_sys::Document);

impl DomDocument for BrowserDocument {
    type Node = BrowserNode;

    fn query_selector(&self, selector: &str) -> Option<BrowserNode> {
        match self.0.query_selector(selector) {
            Ok(node) => node.map(BrowserNode),
            Err(e) => {
                tracing::warn!(selector, "querySelector rejected selector: {e:?}");
                None
            }
        }
    }

    fn body(&self) -> Option<BrowserNode> {
        self.0.body().map(|b| BrowserNode(b.into()))
    }
}
