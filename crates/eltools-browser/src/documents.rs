//! Cross-document resolution.
//!
//! The editor runs in the host page while the edited content renders in a
//! preview iframe. The authoritative working document may be a detached
//! document object the host exposes globally, so every access re-resolves:
//! the host store document first, then the iframe's content document.
//! Nothing here is cached - the iframe can reload at any time.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};

use eltools_core::DocumentAccess;

use crate::dom::BrowserDocument;

/// Id of the preview iframe in the host page.
pub const PREVIEW_IFRAME_ID: &str = "previewiframe";

/// Global the host exposes its working document store under.
const STORE_GLOBAL: &str = "lcMainStore";

/// Per-call locator for the working and preview documents.
#[derive(Clone, Debug)]
pub struct DocumentLocator {
    iframe_id: String,
}

impl Default for DocumentLocator {
    fn default() -> Self {
        Self {
            iframe_id: PREVIEW_IFRAME_ID.to_string(),
        }
    }
}

impl DocumentLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator for a host page with a non-standard iframe id.
    pub fn with_iframe_id(iframe_id: impl Into<String>) -> Self {
        Self {
            iframe_id: iframe_id.into(),
        }
    }

    /// The host store's document, when `lcMainStore.doc` holds one.
    fn store_document(&self) -> Option<web_sys::Document> {
        let window = web_sys::window()?;
        let store = Reflect::get(window.as_ref(), &JsValue::from_str(STORE_GLOBAL)).ok()?;
        if store.is_undefined() || store.is_null() {
            return None;
        }
        let doc = Reflect::get(&store, &JsValue::from_str("doc")).ok()?;
        doc.dyn_into::<web_sys::Document>().ok()
    }

    /// The preview iframe's content document, when the iframe exists and
    /// is same-origin accessible.
    fn iframe_document(&self) -> Option<web_sys::Document> {
        let document = web_sys::window()?.document()?;
        let iframe = document
            .get_element_by_id(&self.iframe_id)?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .ok()?;
        iframe.content_document()
    }
}

impl DocumentAccess for DocumentLocator {
    type Doc = BrowserDocument;

    fn working_document(&self) -> Option<BrowserDocument> {
        self.store_document()
            .or_else(|| self.iframe_document())
            .map(BrowserDocument)
    }

    fn preview_document(&self) -> Option<BrowserDocument> {
        self.iframe_document().map(BrowserDocument)
    }
}
