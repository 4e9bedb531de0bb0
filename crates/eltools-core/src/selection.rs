//! Hover/selection state machine.
//!
//! Tracks pointer-driven hover and click-driven selection over a target
//! document's event stream. The platform layer owns the actual event
//! listeners; it forwards pointer-over, pointer-out, click and escape into
//! this engine, which applies and removes the highlight marker classes and
//! keeps the state invariants:
//!
//! - at most one element carries the hover marker at a time
//! - hovering never replaces the current selection
//! - deactivating clears hover but retains the selection
//!
//! In gated mode (the default) a click must carry Cmd/Ctrl to select, and
//! a successful selection deactivates the machine. In toggle mode a plain
//! click selects and the machine stays active for successive selections.

use smol_str::SmolStr;

use crate::capabilities::HostCapabilities;
use crate::dom::DomNode;
use crate::snapshot::{ElementSnapshot, build_snapshot};
use crate::types::{HOVER_MARKER_CLASS, SELECTED_MARKER_CLASS, UI_CONTAINER_CLASS};

/// Result of feeding a click into the engine.
#[derive(Debug)]
pub enum ClickOutcome<N> {
    /// Not a selection-worthy click; the event should pass through to the
    /// host's own handlers.
    Ignored,
    /// A selection was made. The caller must consume the event
    /// (preventDefault + stopPropagation) and notify its selection
    /// callback. When `deactivated` is set the engine left the active
    /// state and the caller should tear down its listeners.
    Selected {
        snapshot: ElementSnapshot<N>,
        deactivated: bool,
    },
}

/// Pointer interception state for one editor mount.
pub struct SelectionEngine<N: DomNode> {
    active: bool,
    toggle_mode: bool,
    ui_container_class: SmolStr,
    hovered: Option<N>,
    selected: Option<ElementSnapshot<N>>,
}

impl<N: DomNode> SelectionEngine<N> {
    pub fn new(toggle_mode: bool) -> Self {
        Self {
            active: false,
            toggle_mode,
            ui_container_class: SmolStr::new_static(UI_CONTAINER_CLASS),
            hovered: None,
            selected: None,
        }
    }

    /// Override the class marking the editor's own UI container.
    pub fn set_ui_container_class(&mut self, class: &str) {
        self.ui_container_class = SmolStr::new(class);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle_mode(&self) -> bool {
        self.toggle_mode
    }

    pub fn set_toggle_mode(&mut self, toggle_mode: bool) {
        self.toggle_mode = toggle_mode;
    }

    pub fn selected(&self) -> Option<&ElementSnapshot<N>> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&N> {
        self.hovered.as_ref()
    }

    /// Toggle pointer interception. Returns whether the state changed.
    ///
    /// Deactivating clears the transient hover marker but keeps the
    /// current selection so editing can continue while interception is
    /// off.
    pub fn set_active(&mut self, active: bool) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        if !active {
            self.clear_hover();
        }
        tracing::debug!(active, "selection engine toggled");
        true
    }

    /// Pointer moved over `target`.
    pub fn pointer_over(&mut self, target: &N) {
        if !self.active {
            return;
        }
        if target.in_container(&self.ui_container_class) {
            return;
        }
        if self
            .selected
            .as_ref()
            .is_some_and(|s| &s.element == target)
        {
            return;
        }
        if self.hovered.as_ref() == Some(target) {
            return;
        }

        if let Some(previous) = self.hovered.take() {
            previous.remove_class(HOVER_MARKER_CLASS);
        }
        target.add_class(HOVER_MARKER_CLASS);
        self.hovered = Some(target.clone());
    }

    /// Pointer left `target`.
    pub fn pointer_out(&mut self, target: &N) {
        if !self.active {
            return;
        }
        target.remove_class(HOVER_MARKER_CLASS);
        if self.hovered.as_ref() == Some(target) {
            self.hovered = None;
        }
    }

    /// A click landed on `target` with or without the platform modifier
    /// key (Cmd on Mac, Ctrl elsewhere) held.
    pub fn click<H>(&mut self, host: &H, target: &N, modifier_held: bool) -> ClickOutcome<N>
    where
        H: HostCapabilities<N>,
    {
        if !self.active {
            return ClickOutcome::Ignored;
        }
        if target.in_container(&self.ui_container_class) {
            return ClickOutcome::Ignored;
        }
        if !self.toggle_mode && !modifier_held {
            tracing::trace!("plain click ignored, modifier required");
            return ClickOutcome::Ignored;
        }

        self.clear_hover();
        target.remove_class(HOVER_MARKER_CLASS);
        if let Some(previous) = self.selected.take() {
            previous.element.remove_class(SELECTED_MARKER_CLASS);
        }

        // Snapshot before the selection marker lands so the marker never
        // leaks into the captured outer HTML.
        let snapshot = build_snapshot(host, target);
        target.add_class(SELECTED_MARKER_CLASS);
        self.selected = Some(snapshot.clone());

        let deactivated = if self.toggle_mode {
            false
        } else {
            self.active = false;
            true
        };

        tracing::debug!(
            selector = %snapshot.selector,
            tag = %snapshot.tag_name,
            deactivated,
            "element selected"
        );

        ClickOutcome::Selected {
            snapshot,
            deactivated,
        }
    }

    /// Escape clears only the transient hover. The selection is dropped
    /// exclusively by [`Self::clear_selection`].
    pub fn escape(&mut self) {
        self.clear_hover();
    }

    /// Drop the current selection and any hover, removing both markers.
    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selected.take() {
            previous.element.remove_class(SELECTED_MARKER_CLASS);
        }
        self.clear_hover();
    }

    fn clear_hover(&mut self) {
        if let Some(previous) = self.hovered.take() {
            previous.remove_class(HOVER_MARKER_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NullHost;
    use crate::mockdom::{MockDocument, MockNode};

    fn setup() -> (MockDocument, MockNode, MockNode) {
        let doc = MockDocument::with_main();
        let x = MockNode::new("DIV");
        let y = MockNode::new("DIV");
        doc.main().append(&x);
        doc.main().append(&y);
        (doc, x, y)
    }

    #[test]
    fn hover_is_mutually_exclusive() {
        let (_doc, x, y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.pointer_over(&x);
        assert!(x.has_class(HOVER_MARKER_CLASS));

        engine.pointer_over(&y);
        assert!(!x.has_class(HOVER_MARKER_CLASS));
        assert!(y.has_class(HOVER_MARKER_CLASS));
        assert_eq!(engine.hovered(), Some(&y));
    }

    #[test]
    fn pointer_out_clears_hover() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.pointer_over(&x);
        engine.pointer_out(&x);
        assert!(!x.has_class(HOVER_MARKER_CLASS));
        assert!(engine.hovered().is_none());
    }

    #[test]
    fn selection_survives_deactivation() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        let outcome = engine.click(&NullHost, &x, false);
        assert!(matches!(outcome, ClickOutcome::Selected { .. }));
        let selector = engine.selected().unwrap().selector.clone();

        engine.set_active(false);
        engine.set_active(true);
        assert_eq!(engine.selected().unwrap().selector, selector);
    }

    #[test]
    fn deactivation_clears_hover_marker() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.pointer_over(&x);
        engine.set_active(false);
        assert!(!x.has_class(HOVER_MARKER_CLASS));
    }

    #[test]
    fn gated_mode_requires_modifier() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(false);
        engine.set_active(true);

        assert!(matches!(
            engine.click(&NullHost, &x, false),
            ClickOutcome::Ignored
        ));
        assert!(engine.selected().is_none());

        match engine.click(&NullHost, &x, true) {
            ClickOutcome::Selected {
                snapshot,
                deactivated,
            } => {
                assert_eq!(snapshot.tag_name, "DIV");
                assert!(deactivated);
            }
            other => panic!("expected selection, got {other:?}"),
        }
        assert!(!engine.is_active());
    }

    #[test]
    fn toggle_mode_stays_active_for_successive_selections() {
        let (_doc, x, y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.click(&NullHost, &x, false);
        assert!(engine.is_active());

        engine.click(&NullHost, &y, false);
        assert!(engine.is_active());
        assert!(!x.has_class(SELECTED_MARKER_CLASS));
        assert!(y.has_class(SELECTED_MARKER_CLASS));
    }

    #[test]
    fn clicks_inside_editor_ui_are_ignored() {
        let doc = MockDocument::with_main();
        let container = MockNode::new("DIV");
        container.add_class(UI_CONTAINER_CLASS);
        let button = MockNode::new("BUTTON");
        doc.body().append(&container);
        container.append(&button);

        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.pointer_over(&button);
        assert!(!button.has_class(HOVER_MARKER_CLASS));
        assert!(matches!(
            engine.click(&NullHost, &button, true),
            ClickOutcome::Ignored
        ));
    }

    #[test]
    fn escape_clears_hover_but_not_selection() {
        let (_doc, x, y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.click(&NullHost, &x, false);
        engine.pointer_over(&y);
        engine.escape();

        assert!(!y.has_class(HOVER_MARKER_CLASS));
        assert!(engine.selected().is_some());
    }

    #[test]
    fn clear_selection_removes_marker() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.click(&NullHost, &x, false);
        assert!(x.has_class(SELECTED_MARKER_CLASS));

        engine.clear_selection();
        assert!(!x.has_class(SELECTED_MARKER_CLASS));
        assert!(engine.selected().is_none());
    }

    #[test]
    fn hovering_the_selected_element_adds_no_marker() {
        let (_doc, x, _y) = setup();
        let mut engine = SelectionEngine::new(true);
        engine.set_active(true);

        engine.click(&NullHost, &x, false);
        engine.pointer_over(&x);
        assert!(!x.has_class(HOVER_MARKER_CLASS));
    }
}
