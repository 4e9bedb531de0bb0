//! eltools-core: Pure Rust element-editing engine without browser dependencies.
//!
//! This crate provides:
//! - `DomNode` / `DomDocument` / `DocumentAccess` traits for platform abstraction
//! - `derive_selector` - host-compatible CSS path derivation
//! - `ElementSnapshot` - immutable point-in-time element description
//! - `SelectionEngine` - hover/selection state machine
//! - `apply_*_change` - live mutation bridge with host-capability fallbacks
//! - `PendingEdit` - debounce bookkeeping for edit propagation
//!
//! The browser DOM layer lives in `eltools-browser`; this crate compiles and
//! tests natively against an in-memory mock DOM.

pub mod bridge;
pub mod capabilities;
pub mod debounce;
pub mod dom;
pub mod selection;
pub mod selector;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod mockdom;

pub use bridge::{
    ApplyOutcome, ApplyStatus, BridgeError, apply_attribute_change, apply_class_change,
    apply_html_change, effective_selector, read_attribute, read_page_html,
};
pub use capabilities::{HostCapabilities, NullHost};
pub use debounce::{EditChannel, PendingEdit};
pub use dom::{DocumentAccess, DomDocument, DomNode, NodeOf};
pub use selection::{ClickOutcome, SelectionEngine};
pub use selector::{derive_selector, fallback_selector};
pub use smol_str::SmolStr;
pub use snapshot::{ElementSnapshot, build_snapshot, is_internal_class, resolve_selector};
pub use types::{
    HOVER_MARKER_CLASS, INTERNAL_CLASS_PREFIX, ROOT_ID, ROOT_SELECTOR, ROOT_TAG,
    SELECTED_MARKER_CLASS, UI_CONTAINER_CLASS,
};
