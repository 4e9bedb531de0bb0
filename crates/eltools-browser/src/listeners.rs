//! Event listener wiring for the selection engine.
//!
//! Installs mouseover/mouseout (bubble phase), click (capture phase, so a
//! selecting click is consumed before the host page reacts to it) and
//! keydown listeners on a target document, forwarding into a shared
//! [`SelectionEngine`]. Dropping the returned [`ListenerHandles`] removes
//! every listener and restores the body cursor.
//!
//! A selection in gated mode deactivates the engine from inside the click
//! handler; the handles cannot be dropped there because the closure that
//! holds the engine is still on the stack. [`schedule_teardown`] defers
//! the drop to a zero-delay timer instead. Until it fires, every handler
//! no-ops because the engine reports inactive.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;

use eltools_core::{ClickOutcome, DomNode, ElementSnapshot, SelectionEngine};

use crate::dom::BrowserNode;
use crate::host::WindowHost;

/// Invoked on a successful selection with the snapshot and whether the
/// engine auto-deactivated.
pub type SelectCallback = Rc<dyn Fn(ElementSnapshot<BrowserNode>, bool)>;

/// Installed listeners plus the body cursor override. Dropping removes
/// all of it.
pub struct ListenerHandles {
    _mouseover: EventListener,
    _mouseout: EventListener,
    _click: EventListener,
    _keydown: EventListener,
    _cursor: CursorGuard,
}

fn event_element(event: &web_sys::Event) -> Option<BrowserNode> {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(BrowserNode)
}

/// Wire the engine into `doc`'s event stream.
pub fn install_listeners(
    doc: &web_sys::Document,
    engine: Rc<RefCell<SelectionEngine<BrowserNode>>>,
    host: Rc<WindowHost>,
    on_select: SelectCallback,
) -> ListenerHandles {
    let target: &web_sys::EventTarget = doc.as_ref();

    let mouseover = {
        let engine = Rc::clone(&engine);
        EventListener::new(target, "mouseover", move |event| {
            if let Some(node) = event_element(event) {
                engine.borrow_mut().pointer_over(&node);
            }
        })
    };

    let mouseout = {
        let engine = Rc::clone(&engine);
        EventListener::new(target, "mouseout", move |event| {
            if let Some(node) = event_element(event) {
                engine.borrow_mut().pointer_out(&node);
            }
        })
    };

    let click = {
        let engine = Rc::clone(&engine);
        // Must not be passive: a selecting click cancels the event so the
        // host page never acts on it.
        let options = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        };
        EventListener::new_with_options(target, "click", options, move |event| {
            let Some(node) = event_element(event) else {
                return;
            };
            let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            let modifier_held = mouse.meta_key() || mouse.ctrl_key();

            let outcome = engine.borrow_mut().click(host.as_ref(), &node, modifier_held);
            if let ClickOutcome::Selected {
                snapshot,
                deactivated,
            } = outcome
            {
                event.prevent_default();
                event.stop_propagation();
                on_select(snapshot, deactivated);
            }
        })
    };

    let keydown = {
        let engine = Rc::clone(&engine);
        EventListener::new(target, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                if key.key() == "Escape" {
                    engine.borrow_mut().escape();
                }
            }
        })
    };

    tracing::debug!("selection listeners installed");

    ListenerHandles {
        _mouseover: mouseover,
        _mouseout: mouseout,
        _click: click,
        _keydown: keydown,
        _cursor: CursorGuard::engage(doc),
    }
}

/// Drop the handles in `slot` on a zero-delay timer. Safe to call from
/// inside one of the listeners themselves.
///
/// The engine may be reactivated before the timer fires, with fresh
/// handles already installed in the same slot; the timer leaves those
/// alone.
pub fn schedule_teardown(
    slot: Rc<RefCell<Option<ListenerHandles>>>,
    engine: Rc<RefCell<SelectionEngine<BrowserNode>>>,
) {
    Timeout::new(0, move || {
        if engine.borrow().is_active() {
            return;
        }
        if slot.borrow_mut().take().is_some() {
            tracing::debug!("selection listeners removed");
        }
    })
    .forget();
}

/// Crosshair cursor on the target document's body while interception is
/// active. Restores the previous inline value on drop.
struct CursorGuard {
    body: Option<BrowserNode>,
    previous: Option<String>,
}

impl CursorGuard {
    fn engage(doc: &web_sys::Document) -> Self {
        let Some(body) = doc.body() else {
            return Self {
                body: None,
                previous: None,
            };
        };
        let body = BrowserNode(body.into());
        let previous = body.attribute("style");
        let style = body
            .element()
            .clone()
            .dyn_into::<web_sys::HtmlElement>()
            .map(|el| el.style());
        if let Ok(style) = style {
            if let Err(e) = style.set_property("cursor", "crosshair") {
                tracing::warn!("failed to set crosshair cursor: {e:?}");
            }
        }
        Self {
            body: Some(body),
            previous,
        }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let Some(body) = &self.body else {
            return;
        };
        match &self.previous {
            Some(style) => body.set_attribute("style", style),
            None => body.remove_attribute("style"),
        }
    }
}
