//! Window-global host capability lookup.
//!
//! The host registers its functions on `window`, either flat
//! (`window.CSSelector`) or under the `LCUtils` namespace grouped by
//! concern (`LCUtils.core.CSSelector`). Registration happens whenever the
//! host's scripts finish loading, so every capability call re-resolves the
//! function instead of caching the lookup. A lookup miss or a throwing
//! host function is reported as "capability absent" and logged, never
//! propagated.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use eltools_core::HostCapabilities;

use crate::dom::BrowserNode;

const NAMESPACE_GLOBAL: &str = "LCUtils";

/// Host capabilities backed by window globals.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowHost;

impl WindowHost {
    pub fn new() -> Self {
        Self
    }
}

fn function_on(target: &JsValue, name: &str) -> Option<Function> {
    let value = Reflect::get(target, &JsValue::from_str(name)).ok()?;
    value.dyn_into::<Function>().ok()
}

/// Resolve a host function: flat window global first, then the namespace
/// group.
fn lookup(name: &str, group: &str) -> Option<Function> {
    let window = web_sys::window()?;
    if let Some(f) = function_on(window.as_ref(), name) {
        return Some(f);
    }
    let ns = Reflect::get(window.as_ref(), &JsValue::from_str(NAMESPACE_GLOBAL)).ok()?;
    if ns.is_undefined() || ns.is_null() {
        return None;
    }
    let group_obj = Reflect::get(&ns, &JsValue::from_str(group)).ok()?;
    function_on(&group_obj, name)
}

fn call_logged(f: &Function, name: &str, args: &[JsValue]) -> Option<JsValue> {
    let this = JsValue::NULL;
    let result = match args {
        [] => f.call0(&this),
        [a] => f.call1(&this, a),
        [a, b] => f.call2(&this, a, b),
        [a, b, c] => f.call3(&this, a, b, c),
        _ => unreachable!("host functions take at most three arguments"),
    };
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(name, "host function threw, treating as absent: {e:?}");
            None
        }
    }
}

fn call_for_string(name: &str, group: &str, args: &[JsValue]) -> Option<String> {
    let f = lookup(name, group)?;
    call_logged(&f, name, args)?.as_string()
}

fn call_for_effect(name: &str, group: &str, args: &[JsValue]) -> bool {
    let Some(f) = lookup(name, group) else {
        tracing::trace!(name, "host function not registered");
        return false;
    };
    call_logged(&f, name, args).is_some()
}

impl HostCapabilities<BrowserNode> for WindowHost {
    fn compute_selector(&self, element: &BrowserNode) -> Option<String> {
        call_for_string("CSSelector", "core", &[element.element().clone().into()])
    }

    fn get_page_html(&self, selector: &str) -> Option<String> {
        call_for_string("getPageHTML", "content", &[JsValue::from_str(selector)])
    }

    fn set_page_html(&self, selector: &str, html: &str) -> bool {
        call_for_effect(
            "setPageHTML",
            "content",
            &[JsValue::from_str(selector), JsValue::from_str(html)],
        )
    }

    fn get_attribute(&self, selector: &str, name: &str) -> Option<String> {
        call_for_string(
            "getAttributeValue",
            "content",
            &[JsValue::from_str(selector), JsValue::from_str(name)],
        )
    }

    fn set_attribute(&self, selector: &str, name: &str, value: &str) -> bool {
        call_for_effect(
            "setAttributeValue",
            "content",
            &[
                JsValue::from_str(selector),
                JsValue::from_str(name),
                JsValue::from_str(value),
            ],
        )
    }

    fn refresh_preview_region(&self, selector: &str) -> bool {
        call_for_effect(
            "updatePreviewSectorial",
            "preview",
            &[JsValue::from_str(selector)],
        )
    }

    fn refresh_preview(&self) -> bool {
        call_for_effect("updatePreview", "preview", &[])
    }
}
