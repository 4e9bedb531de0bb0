//! Platform abstraction traits for DOM access.
//!
//! These traits define the interface between the engine logic and the
//! platform-specific DOM implementation (browser web-sys, in-memory mock).
//! Handles are non-owning references: the document tree owns every node's
//! lifecycle, and a handle may outlive its node's membership in the tree.
//! Mutating methods take `&self` because DOM handles have interior
//! mutability on every platform that implements them.

use smol_str::SmolStr;

/// A non-owning handle to a live element node.
///
/// Equality is node identity, not structural equality: two handles compare
/// equal iff they reference the same underlying node.
pub trait DomNode: Clone + PartialEq {
    /// Tag name as the DOM reports it (uppercase for HTML documents).
    fn tag_name(&self) -> SmolStr;

    /// The element's id, or `None` when absent or empty.
    fn id(&self) -> Option<SmolStr>;

    /// Whether the node has any parent node, including the document itself.
    fn has_parent(&self) -> bool;

    /// The parent element, if the parent node is an element.
    fn parent_element(&self) -> Option<Self>;

    /// Whether this node is the document's root element or its body.
    fn is_document_boundary(&self) -> bool;

    /// 1-based position among all element siblings, counted by walking
    /// previous-sibling links.
    fn sibling_position(&self) -> usize;

    /// 1-based position and total count among same-tag siblings, or `None`
    /// when the node has no parent element.
    fn same_tag_position(&self) -> Option<(usize, usize)>;

    /// Class list in DOM order.
    fn classes(&self) -> Vec<SmolStr>;

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Replace the entire class attribute with the given string.
    fn set_class_string(&self, value: &str);

    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    fn outer_html(&self) -> String;

    /// All attributes in document order, including `class` and `style`.
    /// Snapshot-level filtering happens in the snapshot builder.
    fn attributes(&self) -> Vec<(SmolStr, String)>;

    /// A single attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    /// Whether the node is still attached to a document tree. Operations
    /// against detached nodes must fail gracefully, not assume validity.
    fn is_connected(&self) -> bool;

    /// Whether this node or any ancestor carries the given class. Used to
    /// keep the editor from selecting its own UI.
    fn in_container(&self, class: &str) -> bool;
}

/// A document that can resolve selectors produced by this engine.
pub trait DomDocument {
    type Node: DomNode;

    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
}

/// Resolves which document is authoritative for a read/write operation.
///
/// The working document is the editable source of truth; the preview
/// document is rendered purely for visual feedback. They may be the same
/// object or distinct ones depending on host state - callers must not
/// assume identity between the two.
pub trait DocumentAccess {
    type Doc: DomDocument;

    /// Priority order: host-exposed store document, then the preview
    /// iframe's content document, then `None`.
    fn working_document(&self) -> Option<Self::Doc>;

    /// Always the preview iframe's content document, when present.
    fn preview_document(&self) -> Option<Self::Doc>;
}

/// Node type produced by a `DocumentAccess` implementation.
pub type NodeOf<A> = <<A as DocumentAccess>::Doc as DomDocument>::Node;
