//! Async clipboard writes.
//!
//! Uses the navigator.clipboard API through a spawned task. Copies are
//! fire-and-forget from the caller's perspective; failures (denied
//! permission, insecure context) are logged, never surfaced.

use wasm_bindgen_futures::JsFuture;

/// Copy `text` to the system clipboard.
pub fn copy_text(text: &str) {
    let text = text.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        if let Err(e) = JsFuture::from(clipboard.write_text(&text)).await {
            tracing::warn!("clipboard write failed: {e:?}");
        }
    });
}
