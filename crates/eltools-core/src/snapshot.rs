//! Immutable element snapshots.
//!
//! A snapshot decouples the editor panel from live DOM mutation: it is
//! taken once at selection time and replaced wholesale on re-selection.
//! The `element` handle is non-owning, and the copied `selector`,
//! `inner_html` and `outer_html` fields go stale the moment the DOM
//! mutates afterwards - the mutation bridge handles that hazard.

use smol_str::SmolStr;

use crate::capabilities::HostCapabilities;
use crate::dom::DomNode;
use crate::selector::{derive_selector, fallback_selector};
use crate::types::{INTERNAL_CLASS_PREFIX, ROOT_ID, ROOT_TAG};

/// Point-in-time description of a selected element.
#[derive(Clone, Debug)]
pub struct ElementSnapshot<N> {
    /// Non-owning handle to the live node.
    pub element: N,
    /// CSS path addressing the element at snapshot time.
    pub selector: String,
    /// Uppercase tag name.
    pub tag_name: SmolStr,
    pub id: Option<SmolStr>,
    /// Classes in DOM order, editor-internal markers filtered out.
    pub classes: Vec<SmolStr>,
    pub inner_html: String,
    pub outer_html: String,
    /// Attributes excluding `class` and `style`, which are edited through
    /// dedicated channels. `id` stays listed so the attribute editor can
    /// change it like any other attribute.
    pub attributes: Vec<(SmolStr, String)>,
}

impl<N: DomNode> ElementSnapshot<N> {
    /// Whether this snapshot describes the root container sentinel.
    pub fn is_root(&self) -> bool {
        self.tag_name == ROOT_TAG && self.id.as_deref() == Some(ROOT_ID)
    }
}

/// Whether a class is an editor-internal marker or a host structural
/// class, excluded from snapshots at the read boundary.
pub fn is_internal_class(class: &str) -> bool {
    class.starts_with(INTERNAL_CLASS_PREFIX)
}

/// Resolve a selector for `element`: the host's algorithm when registered
/// and productive, then the built-in deriver, then the fallback chain.
pub fn resolve_selector<N, H>(host: &H, element: &N) -> String
where
    N: DomNode,
    H: HostCapabilities<N>,
{
    if let Some(selector) = host.compute_selector(element) {
        if !selector.trim().is_empty() {
            return selector;
        }
        tracing::debug!("host selector came back empty, using built-in deriver");
    }

    let derived = derive_selector(element);
    if !derived.trim().is_empty() {
        return derived;
    }

    fallback_selector(element)
}

/// Build a snapshot of `element`. Pure read, no side effects.
pub fn build_snapshot<N, H>(host: &H, element: &N) -> ElementSnapshot<N>
where
    N: DomNode,
    H: HostCapabilities<N>,
{
    let selector = resolve_selector(host, element);

    let classes = element
        .classes()
        .into_iter()
        .filter(|c| !is_internal_class(c))
        .collect();

    let attributes = element
        .attributes()
        .into_iter()
        .filter(|(name, _)| name != "class" && name != "style")
        .collect();

    ElementSnapshot {
        element: element.clone(),
        selector,
        tag_name: element.tag_name(),
        id: element.id(),
        classes,
        inner_html: element.inner_html(),
        outer_html: element.outer_html(),
        attributes,
    }
}
