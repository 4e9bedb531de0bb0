//! ElementTools - the main element-editing wrapper for JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use eltools_browser::{
    BrowserNode, DebouncedChannel, DocumentLocator, ListenerHandles, SelectCallback, WindowHost,
    clipboard, install_listeners, schedule_teardown,
};
use eltools_core::{
    ApplyOutcome, DocumentAccess, EditChannel, ElementSnapshot, SelectionEngine,
    UI_CONTAINER_CLASS, apply_attribute_change, apply_class_change, apply_html_change,
    effective_selector, read_attribute, read_page_html,
};

use crate::types::{SnapshotJson, StatusJson, ToolsConfig};

/// The element tools instance exposed to JavaScript.
///
/// Owns the selection engine, the event listeners on the preview document
/// and the debounced edit channels. One instance per editor mount.
#[wasm_bindgen]
pub struct ElementTools {
    engine: Rc<RefCell<SelectionEngine<BrowserNode>>>,
    host: WindowHost,
    locator: DocumentLocator,
    container_class: String,
    listeners: Rc<RefCell<Option<ListenerHandles>>>,
    on_select: Rc<RefCell<Option<js_sys::Function>>>,
    on_status: Rc<RefCell<Option<js_sys::Function>>>,
    class_edits: DebouncedChannel,
    html_edits: DebouncedChannel,
    attribute_edits: DebouncedChannel<(String, String)>,
}

fn emit_status(slot: &RefCell<Option<js_sys::Function>>, status: &StatusJson) {
    // Clone out of the cell so a callback that re-enters us can't hit a
    // held borrow.
    let Some(callback) = slot.borrow().as_ref().cloned() else {
        return;
    };
    if let Ok(value) = serde_wasm_bindgen::to_value(status) {
        let _ = callback.call1(&JsValue::NULL, &value);
    }
}

fn no_selection() -> ApplyOutcome {
    ApplyOutcome::error("no element is selected")
}

#[wasm_bindgen]
impl ElementTools {
    /// Create a new instance. Nothing is installed until activation.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<ToolsConfig>) -> Self {
        let config = config.unwrap_or_default();

        let mut engine = SelectionEngine::new(config.toggle_mode);
        if let Some(class) = &config.container_class {
            engine.set_ui_container_class(class);
        }
        let locator = match config.iframe_id {
            Some(id) => DocumentLocator::with_iframe_id(id),
            None => DocumentLocator::new(),
        };

        Self {
            engine: Rc::new(RefCell::new(engine)),
            host: WindowHost::new(),
            locator,
            container_class: config
                .container_class
                .unwrap_or_else(|| UI_CONTAINER_CLASS.to_string()),
            listeners: Rc::new(RefCell::new(None)),
            on_select: Rc::new(RefCell::new(None)),
            on_status: Rc::new(RefCell::new(None)),
            class_edits: DebouncedChannel::new(EditChannel::Classes),
            html_edits: DebouncedChannel::new(EditChannel::Html),
            attribute_edits: DebouncedChannel::new(EditChannel::Attributes),
        }
    }

    /// Callback invoked with a `SnapshotJson` on every selection.
    #[wasm_bindgen(js_name = setOnSelect)]
    pub fn set_on_select(&self, callback: js_sys::Function) {
        *self.on_select.borrow_mut() = Some(callback);
    }

    /// Callback invoked with a `StatusJson` as queued edits progress.
    #[wasm_bindgen(js_name = setOnStatus)]
    pub fn set_on_status(&self, callback: js_sys::Function) {
        *self.on_status.borrow_mut() = Some(callback);
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.engine.borrow().is_active()
    }

    #[wasm_bindgen(js_name = setToggleMode)]
    pub fn set_toggle_mode(&self, toggle_mode: bool) {
        self.engine.borrow_mut().set_toggle_mode(toggle_mode);
    }

    /// Turn pointer interception on or off.
    ///
    /// Activation re-checks the mount preconditions every time: the tools
    /// container must be in the host page and the preview document must be
    /// reachable. Deactivation keeps the current selection.
    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, active: bool) -> Result<(), JsError> {
        if !active {
            if self.engine.borrow_mut().set_active(false) {
                self.listeners.borrow_mut().take();
            }
            return Ok(());
        }

        let target = self.target_document()?;
        if !self.engine.borrow_mut().set_active(true) {
            return Ok(());
        }

        let on_select = Rc::clone(&self.on_select);
        let listeners_slot = Rc::clone(&self.listeners);
        let engine = Rc::clone(&self.engine);
        let callback: SelectCallback =
            Rc::new(move |snapshot: ElementSnapshot<BrowserNode>, deactivated: bool| {
                if let Some(callback) = on_select.borrow().as_ref().cloned() {
                    if let Ok(value) = serde_wasm_bindgen::to_value(&SnapshotJson::from(&snapshot))
                    {
                        let _ = callback.call1(&JsValue::NULL, &value);
                    }
                }
                // Listener teardown can't happen from inside the click
                // listener itself; defer it past the current task.
                if deactivated {
                    schedule_teardown(Rc::clone(&listeners_slot), Rc::clone(&engine));
                }
            });

        let handles = install_listeners(
            &target,
            Rc::clone(&self.engine),
            Rc::new(self.host),
            callback,
        );
        *self.listeners.borrow_mut() = Some(handles);
        Ok(())
    }

    /// The current selection, if any.
    pub fn selected(&self) -> Option<SnapshotJson> {
        self.engine.borrow().selected().map(SnapshotJson::from)
    }

    /// Selector the bridge would address writes to right now.
    #[wasm_bindgen(js_name = selectedSelector)]
    pub fn selected_selector(&self) -> Option<String> {
        let engine = self.engine.borrow();
        engine
            .selected()
            .map(|snapshot| effective_selector(&self.host, snapshot))
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) {
        self.engine.borrow_mut().clear_selection();
    }

    // === Immediate edits ===

    #[wasm_bindgen(js_name = applyClassChange)]
    pub fn apply_class_change(&self, class_string: &str) -> StatusJson {
        let engine = self.engine.borrow();
        let outcome = match engine.selected() {
            Some(snapshot) => apply_class_change(&self.locator, &self.host, snapshot, class_string),
            None => no_selection(),
        };
        StatusJson::from(&outcome)
    }

    #[wasm_bindgen(js_name = applyHtmlChange)]
    pub fn apply_html_change(&self, html: &str) -> StatusJson {
        let engine = self.engine.borrow();
        let outcome = match engine.selected() {
            Some(snapshot) => apply_html_change(&self.locator, &self.host, snapshot, html),
            None => no_selection(),
        };
        StatusJson::from(&outcome)
    }

    /// An empty value removes the attribute.
    #[wasm_bindgen(js_name = applyAttributeChange)]
    pub fn apply_attribute_change(&self, name: &str, value: &str) -> StatusJson {
        let engine = self.engine.borrow();
        let outcome = match engine.selected() {
            Some(snapshot) => {
                apply_attribute_change(&self.locator, &self.host, snapshot, name, value)
            }
            None => no_selection(),
        };
        StatusJson::from(&outcome)
    }

    // === Debounced edits ===

    /// Buffer a class edit; only the last value of a burst is applied.
    /// Emits a `saving` status immediately and the outcome on flush.
    #[wasm_bindgen(js_name = queueClassChange)]
    pub fn queue_class_change(&mut self, class_string: &str) {
        emit_status(&self.on_status, &StatusJson::saving());
        let engine = Rc::clone(&self.engine);
        let on_status = Rc::clone(&self.on_status);
        let locator = self.locator.clone();
        let host = self.host;
        self.class_edits
            .submit(class_string.to_string(), move |value| {
                let outcome = match engine.borrow().selected() {
                    Some(snapshot) => apply_class_change(&locator, &host, snapshot, &value),
                    None => no_selection(),
                };
                emit_status(&on_status, &StatusJson::from(&outcome));
            });
    }

    /// Buffer an inner-HTML edit. Debounces slower than class edits.
    #[wasm_bindgen(js_name = queueHtmlChange)]
    pub fn queue_html_change(&mut self, html: &str) {
        emit_status(&self.on_status, &StatusJson::saving());
        let engine = Rc::clone(&self.engine);
        let on_status = Rc::clone(&self.on_status);
        let locator = self.locator.clone();
        let host = self.host;
        self.html_edits.submit(html.to_string(), move |value| {
            let outcome = match engine.borrow().selected() {
                Some(snapshot) => apply_html_change(&locator, &host, snapshot, &value),
                None => no_selection(),
            };
            emit_status(&on_status, &StatusJson::from(&outcome));
        });
    }

    /// Buffer an attribute edit. A later edit to any attribute supersedes
    /// a pending one, matching single-field editing in the panel.
    #[wasm_bindgen(js_name = queueAttributeChange)]
    pub fn queue_attribute_change(&mut self, name: &str, value: &str) {
        emit_status(&self.on_status, &StatusJson::saving());
        let engine = Rc::clone(&self.engine);
        let on_status = Rc::clone(&self.on_status);
        let locator = self.locator.clone();
        let host = self.host;
        self.attribute_edits.submit(
            (name.to_string(), value.to_string()),
            move |(name, value)| {
                let outcome = match engine.borrow().selected() {
                    Some(snapshot) => {
                        apply_attribute_change(&locator, &host, snapshot, &name, &value)
                    }
                    None => no_selection(),
                };
                emit_status(&on_status, &StatusJson::from(&outcome));
            },
        );
    }

    // === Content reads ===

    /// Inner HTML of the selected element as the working document has it.
    #[wasm_bindgen(js_name = readSelectedHtml)]
    pub fn read_selected_html(&self) -> Option<String> {
        let selector = self.selected_selector()?;
        read_page_html(&self.locator, &self.host, &selector)
    }

    /// One attribute of the selected element from the working document.
    #[wasm_bindgen(js_name = readAttribute)]
    pub fn read_attribute(&self, name: &str) -> Option<String> {
        let selector = self.selected_selector()?;
        read_attribute(&self.locator, &self.host, &selector, name)
    }

    // === Clipboard ===

    #[wasm_bindgen(js_name = copySelector)]
    pub fn copy_selector(&self) {
        if let Some(selector) = self.selected_selector() {
            clipboard::copy_text(&selector);
        }
    }

    #[wasm_bindgen(js_name = copyOuterHtml)]
    pub fn copy_outer_html(&self) {
        let engine = self.engine.borrow();
        if let Some(snapshot) = engine.selected() {
            clipboard::copy_text(&snapshot.outer_html);
        }
    }

    /// Tear everything down: listeners, markers, pending edits.
    pub fn dispose(&mut self) {
        self.listeners.borrow_mut().take();
        self.class_edits.cancel();
        self.html_edits.cancel();
        self.attribute_edits.cancel();
        let mut engine = self.engine.borrow_mut();
        engine.set_active(false);
        engine.clear_selection();
    }

    /// Resolve the document listeners attach to, re-checking the mount
    /// preconditions.
    fn target_document(&self) -> Result<web_sys::Document, JsError> {
        let page = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("host document is unavailable"))?;

        let container_selector = format!(".{}", self.container_class);
        if page
            .query_selector(&container_selector)
            .ok()
            .flatten()
            .is_none()
        {
            return Err(JsError::new("element tools container is not mounted"));
        }

        self.locator
            .preview_document()
            .map(|doc| doc.0)
            .ok_or_else(|| JsError::new("preview document is not available"))
    }
}
