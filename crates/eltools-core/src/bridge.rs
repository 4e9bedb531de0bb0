//! Live mutation bridge.
//!
//! Applies class, inner-HTML and attribute edits from the panel to the
//! working document through host setters when they exist, with layered
//! fallbacks so the user always sees feedback:
//!
//! 1. resolve the effective selector (the root sentinel always maps to its
//!    fixed canonical form)
//! 2. write through the host setter when registered
//! 3. mutate the snapshot's in-memory node directly, unconditionally, so
//!    the rendered element updates even when host functions are slow or
//!    absent
//! 4. with no host setter, also locate and mutate the preview document's
//!    matching node
//! 5. request a region refresh, falling back to a full preview refresh
//!
//! Nothing here ever propagates an error to the caller: failures are
//! logged and surfaced through [`ApplyOutcome`].

use thiserror::Error;

use crate::capabilities::HostCapabilities;
use crate::dom::{DocumentAccess, DomDocument, DomNode, NodeOf};
use crate::snapshot::ElementSnapshot;
use crate::types::ROOT_SELECTOR;

/// Transient status surfaced to the editor UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyStatus {
    Saving,
    Success,
    Error,
}

impl ApplyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplyStatus::Saving => "saving",
            ApplyStatus::Success => "success",
            ApplyStatus::Error => "error",
        }
    }
}

/// Result of one bridge operation. Never an exception.
#[derive(Clone, Debug)]
pub struct ApplyOutcome {
    pub status: ApplyStatus,
    pub message: String,
}

impl ApplyOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ApplyStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApplyStatus::Error,
            message: message.into(),
        }
    }
}

/// Internal failure taxonomy; converted to outcomes and log lines at the
/// operation boundary.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("working document unavailable")]
    WorkingDocumentUnavailable,
    #[error("no element matches selector `{0}`")]
    SelectorMiss(String),
    #[error("snapshot element is no longer attached to a document")]
    DetachedElement,
}

#[derive(Clone, Copy)]
enum Edit<'a> {
    Classes(&'a str),
    Html(&'a str),
    Attribute { name: &'a str, value: &'a str },
}

impl Edit<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Edit::Classes(_) => "class",
            Edit::Html(_) => "html",
            Edit::Attribute { .. } => "attribute",
        }
    }
}

/// Replace the class attribute of the snapshot's element.
pub fn apply_class_change<A, H>(
    access: &A,
    host: &H,
    snapshot: &ElementSnapshot<NodeOf<A>>,
    class_string: &str,
) -> ApplyOutcome
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    apply_edit(access, host, snapshot, Edit::Classes(class_string))
}

/// Replace the inner HTML of the snapshot's element.
pub fn apply_html_change<A, H>(
    access: &A,
    host: &H,
    snapshot: &ElementSnapshot<NodeOf<A>>,
    html: &str,
) -> ApplyOutcome
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    apply_edit(access, host, snapshot, Edit::Html(html))
}

/// Set one attribute on the snapshot's element. An empty value removes
/// the attribute, matching host setter semantics.
pub fn apply_attribute_change<A, H>(
    access: &A,
    host: &H,
    snapshot: &ElementSnapshot<NodeOf<A>>,
    name: &str,
    value: &str,
) -> ApplyOutcome
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    apply_edit(access, host, snapshot, Edit::Attribute { name, value })
}

/// Selector the bridge addresses writes to.
///
/// The root container always maps to its fixed canonical selector. For
/// everything else the host's selector algorithm is consulted fresh at
/// apply time, falling back to the selector captured in the snapshot.
pub fn effective_selector<N, H>(host: &H, snapshot: &ElementSnapshot<N>) -> String
where
    N: DomNode,
    H: HostCapabilities<N>,
{
    if snapshot.is_root() || snapshot.selector == ROOT_SELECTOR {
        return ROOT_SELECTOR.to_string();
    }

    if let Some(fresh) = host.compute_selector(&snapshot.element) {
        if !fresh.trim().is_empty() {
            return fresh;
        }
    }
    snapshot.selector.clone()
}

fn apply_edit<A, H>(
    access: &A,
    host: &H,
    snapshot: &ElementSnapshot<NodeOf<A>>,
    edit: Edit<'_>,
) -> ApplyOutcome
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    let selector = effective_selector(host, snapshot);

    let host_applied = match edit {
        Edit::Classes(value) => host.set_attribute(&selector, "class", value),
        Edit::Html(value) => host.set_page_html(&selector, value),
        Edit::Attribute { name, value } => host.set_attribute(&selector, name, value),
    };

    // Immediate feedback on the node the user is looking at, regardless of
    // host-function availability.
    let direct_applied = if snapshot.element.is_connected() {
        apply_to_node(&snapshot.element, edit);
        true
    } else {
        tracing::warn!(
            %selector,
            kind = edit.describe(),
            "{}",
            BridgeError::DetachedElement
        );
        false
    };

    let mut preview_applied = false;
    if !host_applied {
        if let Some(preview) = access.preview_document() {
            match preview.query_selector(&selector) {
                Some(node) => {
                    // The preview may render the very node the snapshot
                    // holds; don't double-apply.
                    if node != snapshot.element {
                        apply_to_node(&node, edit);
                    }
                    preview_applied = true;
                }
                None => {
                    tracing::warn!(
                        kind = edit.describe(),
                        "{}",
                        BridgeError::SelectorMiss(selector.clone())
                    );
                }
            }
        }
    }

    if !host.refresh_preview_region(&selector) {
        host.refresh_preview();
    }

    if host_applied || direct_applied || preview_applied {
        tracing::debug!(%selector, kind = edit.describe(), host_applied, "edit applied");
        ApplyOutcome::success("Changes applied successfully")
    } else {
        ApplyOutcome::error(BridgeError::SelectorMiss(selector).to_string())
    }
}

fn apply_to_node<N: DomNode>(node: &N, edit: Edit<'_>) {
    match edit {
        Edit::Classes(value) => node.set_class_string(value),
        Edit::Html(value) => node.set_inner_html(value),
        Edit::Attribute { name, value } => {
            if value.is_empty() {
                node.remove_attribute(name);
            } else {
                node.set_attribute(name, value);
            }
        }
    }
}

/// Read the inner HTML of the working-document node matching `selector`,
/// preferring the host getter.
pub fn read_page_html<A, H>(access: &A, host: &H, selector: &str) -> Option<String>
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    if let Some(html) = host.get_page_html(selector) {
        return Some(html);
    }

    let Some(doc) = access.working_document() else {
        tracing::warn!(%selector, "{}", BridgeError::WorkingDocumentUnavailable);
        return None;
    };
    match doc.query_selector(selector) {
        Some(node) => Some(node.inner_html()),
        None => {
            tracing::warn!("{}", BridgeError::SelectorMiss(selector.to_string()));
            None
        }
    }
}

/// Read one attribute of the working-document node matching `selector`,
/// preferring the host getter.
pub fn read_attribute<A, H>(access: &A, host: &H, selector: &str, name: &str) -> Option<String>
where
    A: DocumentAccess,
    H: HostCapabilities<NodeOf<A>>,
{
    if let Some(value) = host.get_attribute(selector, name) {
        return Some(value);
    }

    let Some(doc) = access.working_document() else {
        tracing::warn!(%selector, "{}", BridgeError::WorkingDocumentUnavailable);
        return None;
    };
    match doc.query_selector(selector) {
        Some(node) => node.attribute(name),
        None => {
            tracing::warn!("{}", BridgeError::SelectorMiss(selector.to_string()));
            None
        }
    }
}
