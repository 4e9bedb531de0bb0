//! Host capability façade.
//!
//! The embedding host may expose selector computation, content getters and
//! setters, and preview refresh functions. All of them are optional: the
//! host's scripts load asynchronously relative to this engine, so absence
//! is the expected common case, and implementations must re-resolve on
//! every call rather than caching a lookup. A host function that throws is
//! caught by the implementation and reported as absent.
//!
//! Every default here is "capability absent"; call sites carry their own
//! fallback behavior.

/// Optional host-provided operations, generic over the platform node type.
pub trait HostCapabilities<N> {
    /// Host's own canonical selector algorithm.
    fn compute_selector(&self, _element: &N) -> Option<String> {
        None
    }

    /// Read the inner HTML of the working-document node matching `selector`.
    fn get_page_html(&self, _selector: &str) -> Option<String> {
        None
    }

    /// Write inner HTML through the host. Returns whether a host setter
    /// existed and was called.
    fn set_page_html(&self, _selector: &str, _html: &str) -> bool {
        false
    }

    /// Read a single attribute through the host.
    fn get_attribute(&self, _selector: &str, _name: &str) -> Option<String> {
        None
    }

    /// Write a single attribute through the host. An empty value removes
    /// the attribute (host semantics). Returns whether a host setter
    /// existed and was called.
    fn set_attribute(&self, _selector: &str, _name: &str, _value: &str) -> bool {
        false
    }

    /// Re-render one subtree of the preview. Returns whether the host
    /// provided the refresher.
    fn refresh_preview_region(&self, _selector: &str) -> bool {
        false
    }

    /// Re-render the entire preview, fallback when no region refresher
    /// exists. Returns whether the host provided it.
    fn refresh_preview(&self) -> bool {
        false
    }
}

/// A host with no capabilities. Every operation falls back.
pub struct NullHost;

impl<N> HostCapabilities<N> for NullHost {}
