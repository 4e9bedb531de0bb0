//! Host-compatible CSS selector derivation.
//!
//! Walks from an element up through its ancestors, emitting one
//! `TAG:nth-child(k)` segment per level, and stops at the designated root
//! container (`MAIN#lc-main`) so selectors never reach above the editable
//! region. The nth-child position is computed by counting previous element
//! siblings, which makes selectors positionally fragile against sibling
//! insertion - a deliberate trade-off the host's own selector algorithm
//! shares, so both sides resolve paths identically.

use crate::dom::DomNode;
use crate::types::{ROOT_ID, ROOT_TAG};

/// Derive a CSS path for `element`, stopping at the root sentinel.
///
/// The root container contributes a single `MAIN#lc-main` segment with no
/// ancestors above it. The document's html/body elements contribute their
/// bare tag name. Every other level contributes `TAG:nth-child(k)`.
/// Segments are joined with `" > "`.
///
/// Returns an empty string for a detached element with no parent at all.
pub fn derive_selector<N: DomNode>(element: &N) -> String {
    let mut names: Vec<String> = Vec::new();
    let mut current = element.clone();

    loop {
        if !current.has_parent() {
            break;
        }

        if current.tag_name() == ROOT_TAG && current.id().as_deref() == Some(ROOT_ID) {
            names.push(format!("{ROOT_TAG}#{ROOT_ID}"));
            break;
        }

        if current.is_document_boundary() {
            names.push(current.tag_name().to_string());
        } else {
            names.push(format!(
                "{}:nth-child({})",
                current.tag_name(),
                current.sibling_position()
            ));
        }

        match current.parent_element() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    names.reverse();
    names.join(" > ")
}

/// Last-resort selector when both the host's algorithm and
/// [`derive_selector`] come up empty.
///
/// Preference order: `#id`, first class, `tag:nth-of-type(i)` when the
/// element shares its tag with siblings, bare tag name.
pub fn fallback_selector<N: DomNode>(element: &N) -> String {
    if let Some(id) = element.id() {
        let id = id.trim();
        if !id.is_empty() {
            return format!("#{id}");
        }
    }

    if let Some(first) = element
        .classes()
        .into_iter()
        .find(|c| !c.trim().is_empty())
    {
        return format!(".{first}");
    }

    let tag = element.tag_name().to_lowercase();
    match element.same_tag_position() {
        Some((index, count)) if count > 1 => format!("{tag}:nth-of-type({index})"),
        _ => tag,
    }
}
