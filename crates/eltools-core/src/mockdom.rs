//! In-memory DOM for native tests.
//!
//! Implements the `DomNode`/`DomDocument`/`DocumentAccess` traits over a
//! small Rc tree. The element structure (parents, siblings, classes,
//! attributes) is real; `inner_html` is an opaque stored string rather
//! than a parsed subtree, which is all the engine ever treats it as.
//! `query_selector` understands exactly the selector forms the engine
//! produces: `TAG`, `TAG#id`, `#id`, `.class` and `TAG:nth-child(k)`
//! segments joined with `" > "`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::capabilities::HostCapabilities;
use crate::dom::{DocumentAccess, DomDocument, DomNode};

// === MockNode ===

#[derive(Clone)]
pub struct MockNode(Rc<RefCell<NodeData>>);

struct NodeData {
    tag: SmolStr,
    classes: Vec<SmolStr>,
    attrs: Vec<(SmolStr, String)>,
    inner_html: String,
    parent: Option<Weak<RefCell<NodeData>>>,
    children: Vec<MockNode>,
    boundary: bool,
    document_parent: bool,
}

impl PartialEq for MockNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for MockNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockNode(<{}>)", self.0.borrow().tag)
    }
}

impl MockNode {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: SmolStr::new(tag),
            classes: Vec::new(),
            attrs: Vec::new(),
            inner_html: String::new(),
            parent: None,
            children: Vec::new(),
            boundary: false,
            document_parent: false,
        })))
    }

    fn new_boundary(tag: &str, document_parent: bool) -> Self {
        let node = Self::new(tag);
        node.0.borrow_mut().boundary = true;
        node.0.borrow_mut().document_parent = document_parent;
        node
    }

    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    pub fn append(&self, child: &MockNode) {
        child.detach();
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn detach(&self) {
        let parent = self.0.borrow().parent.as_ref().and_then(Weak::upgrade);
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = None;
    }

    fn children(&self) -> Vec<MockNode> {
        self.0.borrow().children.clone()
    }
}

impl DomNode for MockNode {
    fn tag_name(&self) -> SmolStr {
        self.0.borrow().tag.clone()
    }

    fn id(&self) -> Option<SmolStr> {
        self.attribute("id")
            .filter(|v| !v.is_empty())
            .map(SmolStr::new)
    }

    fn has_parent(&self) -> bool {
        let data = self.0.borrow();
        data.parent.is_some() || data.document_parent
    }

    fn parent_element(&self) -> Option<Self> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(MockNode)
    }

    fn is_document_boundary(&self) -> bool {
        self.0.borrow().boundary
    }

    fn sibling_position(&self) -> usize {
        match self.parent_element() {
            Some(parent) => {
                parent
                    .children()
                    .iter()
                    .position(|c| c == self)
                    .map(|i| i + 1)
                    .unwrap_or(1)
            }
            None => 1,
        }
    }

    fn same_tag_position(&self) -> Option<(usize, usize)> {
        let parent = self.parent_element()?;
        let tag = self.tag_name();
        let same: Vec<MockNode> = parent
            .children()
            .into_iter()
            .filter(|c| c.tag_name() == tag)
            .collect();
        let index = same.iter().position(|c| c == self)? + 1;
        Some((index, same.len()))
    }

    fn classes(&self) -> Vec<SmolStr> {
        self.0.borrow().classes.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(SmolStr::new(class));
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_string(&self, value: &str) {
        self.0.borrow_mut().classes = value.split_whitespace().map(SmolStr::new).collect();
    }

    fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().inner_html = html.to_string();
    }

    fn outer_html(&self) -> String {
        let tag = self.tag_name().to_lowercase();
        let mut open = format!("<{tag}");
        for (name, value) in self.attributes() {
            open.push_str(&format!(" {name}=\"{value}\""));
        }
        format!("{open}>{}</{tag}>", self.inner_html())
    }

    fn attributes(&self) -> Vec<(SmolStr, String)> {
        let data = self.0.borrow();
        let mut out = Vec::new();
        if !data.classes.is_empty() {
            let joined = data
                .classes
                .iter()
                .map(SmolStr::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            out.push((SmolStr::new("class"), joined));
        }
        out.extend(data.attrs.iter().cloned());
        out
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            let data = self.0.borrow();
            if data.classes.is_empty() {
                return None;
            }
            return Some(
                data.classes
                    .iter()
                    .map(SmolStr::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        self.0
            .borrow()
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_string(value);
            return;
        }
        let mut data = self.0.borrow_mut();
        if let Some(slot) = data.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            data.attrs.push((SmolStr::new(name), value.to_string()));
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attrs.retain(|(n, _)| n != name);
    }

    fn is_connected(&self) -> bool {
        let mut current = self.clone();
        loop {
            if current.0.borrow().document_parent {
                return true;
            }
            match current.parent_element() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn in_container(&self, class: &str) -> bool {
        let mut current = self.clone();
        loop {
            if current.has_class(class) {
                return true;
            }
            match current.parent_element() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

// === MockDocument ===

#[derive(Clone)]
pub struct MockDocument {
    html: MockNode,
    body: MockNode,
    main: Option<MockNode>,
}

impl MockDocument {
    /// An empty document: `<html><body/></html>`.
    pub fn new() -> Self {
        let html = MockNode::new_boundary("HTML", true);
        let body = MockNode::new_boundary("BODY", false);
        html.append(&body);
        Self {
            html,
            body,
            main: None,
        }
    }

    /// A document with the root container: `<html><body><main id="lc-main"/></body></html>`.
    pub fn with_main() -> Self {
        let mut doc = Self::new();
        let main = MockNode::new("MAIN");
        main.set_id("lc-main");
        doc.body.append(&main);
        doc.main = Some(main);
        doc
    }

    pub fn main(&self) -> MockNode {
        self.main.clone().expect("document built without lc-main")
    }

    pub fn body(&self) -> MockNode {
        self.body.clone()
    }
}

impl DomDocument for MockDocument {
    type Node = MockNode;

    fn query_selector(&self, selector: &str) -> Option<MockNode> {
        let mut segments = selector.split(" > ").map(Segment::parse);

        let first = segments.next()?;
        let mut current = find_first(&self.html, &first)?;

        for segment in segments {
            current = current
                .children()
                .into_iter()
                .find(|child| segment.matches(child))?;
        }
        Some(current)
    }

    fn body(&self) -> Option<MockNode> {
        Some(self.body.clone())
    }
}

fn find_first(node: &MockNode, segment: &Segment) -> Option<MockNode> {
    if segment.matches(node) {
        return Some(node.clone());
    }
    node.children()
        .iter()
        .find_map(|child| find_first(child, segment))
}

#[derive(Default)]
struct Segment {
    tag: Option<String>,
    id: Option<String>,
    class: Option<String>,
    nth_child: Option<usize>,
}

impl Segment {
    fn parse(input: &str) -> Self {
        let mut segment = Segment::default();
        let input = input.trim();

        let head = match input.split_once(":nth-child(") {
            Some((head, rest)) => {
                segment.nth_child = rest.strip_suffix(')').and_then(|k| k.parse().ok());
                head
            }
            None => input,
        };

        if let Some((tag, id)) = head.split_once('#') {
            if !tag.is_empty() {
                segment.tag = Some(tag.to_string());
            }
            segment.id = Some(id.to_string());
        } else if let Some((tag, class)) = head.split_once('.') {
            if !tag.is_empty() {
                segment.tag = Some(tag.to_string());
            }
            segment.class = Some(class.to_string());
        } else if !head.is_empty() {
            segment.tag = Some(head.to_string());
        }
        segment
    }

    fn matches(&self, node: &MockNode) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id().as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !node.has_class(class) {
                return false;
            }
        }
        if let Some(k) = self.nth_child {
            if node.sibling_position() != k {
                return false;
            }
        }
        true
    }
}

// === MockAccess ===

pub struct MockAccess {
    working: Option<MockDocument>,
    preview: Option<MockDocument>,
}

impl MockAccess {
    /// Neither document resolvable, as in a bare unit-test environment.
    pub fn none() -> Self {
        Self {
            working: None,
            preview: None,
        }
    }

    pub fn working_only(doc: MockDocument) -> Self {
        Self {
            working: Some(doc),
            preview: None,
        }
    }

    pub fn preview_only(doc: MockDocument) -> Self {
        Self {
            working: None,
            preview: Some(doc),
        }
    }
}

impl DocumentAccess for MockAccess {
    type Doc = MockDocument;

    fn working_document(&self) -> Option<MockDocument> {
        self.working.clone()
    }

    fn preview_document(&self) -> Option<MockDocument> {
        self.preview.clone()
    }
}

// === ScriptedHost ===

/// Host capability stub with per-operation presence flags and a call log.
pub struct ScriptedHost {
    selector: Option<String>,
    html_setter: bool,
    attr_setter: bool,
    region_refresh: bool,
    full_refresh: bool,
    attribute_value: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            selector: None,
            html_setter: false,
            attr_setter: false,
            region_refresh: false,
            full_refresh: false,
            attribute_value: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_selector(selector: &str) -> Self {
        let mut host = Self::new();
        host.selector = Some(selector.to_string());
        host
    }

    pub fn html_setter(mut self) -> Self {
        self.html_setter = true;
        self
    }

    pub fn attr_setter(mut self) -> Self {
        self.attr_setter = true;
        self
    }

    pub fn region_refresh(mut self) -> Self {
        self.region_refresh = true;
        self
    }

    pub fn full_refresh(mut self) -> Self {
        self.full_refresh = true;
        self
    }

    pub fn attribute_value(mut self, value: &str) -> Self {
        self.attribute_value = Some(value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl<N> HostCapabilities<N> for ScriptedHost {
    fn compute_selector(&self, _element: &N) -> Option<String> {
        self.selector.clone()
    }

    fn get_page_html(&self, _selector: &str) -> Option<String> {
        None
    }

    fn set_page_html(&self, selector: &str, _html: &str) -> bool {
        if self.html_setter {
            self.record(format!("setPageHTML {selector}"));
        }
        self.html_setter
    }

    fn get_attribute(&self, _selector: &str, _name: &str) -> Option<String> {
        self.attribute_value.clone()
    }

    fn set_attribute(&self, selector: &str, name: &str, _value: &str) -> bool {
        if self.attr_setter {
            self.record(format!("setAttributeValue {selector} {name}"));
        }
        self.attr_setter
    }

    fn refresh_preview_region(&self, selector: &str) -> bool {
        if self.region_refresh {
            self.record(format!("updatePreviewSectorial {selector}"));
        }
        self.region_refresh
    }

    fn refresh_preview(&self) -> bool {
        if self.full_refresh {
            self.record("updatePreview".to_string());
        }
        self.full_refresh
    }
}
