//! Well-known host markers and sentinels.
//!
//! These are fixed contracts with the LiveCanvas host, not configuration:
//! the host's own tooling round-trips the root selector and the highlight
//! marker classes, so they must match exactly.

/// Tag of the root container at which selector derivation stops ascending.
pub const ROOT_TAG: &str = "MAIN";

/// Id of the root container.
pub const ROOT_ID: &str = "lc-main";

/// Canonical selector for the root container. The root's position-based
/// selector is unstable, so host tooling always expects this fixed form.
pub const ROOT_SELECTOR: &str = "main#lc-main";

/// Marker class applied to the element currently under the pointer.
pub const HOVER_MARKER_CLASS: &str = "lc-highlight-hover";

/// Marker class applied to the currently selected element.
pub const SELECTED_MARKER_CLASS: &str = "lc-highlight-currently-editing";

/// Class on the editor's own UI container. Pointer events originating
/// inside it are never selection candidates.
pub const UI_CONTAINER_CLASS: &str = "lc-element-tools-container";

/// Prefix of editor-internal and host-structural classes, filtered out of
/// snapshots at the read boundary.
pub const INTERNAL_CLASS_PREFIX: &str = "lc-";
