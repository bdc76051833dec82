//! Pointer routing: hover tracking, button capture and click detection.
//!
//! A window is either idle or captured by the element a button went down on.
//! While idle, pointer events go to whatever element is under the pointer.
//! While captured, they all go to the captured element, and hover can only
//! toggle between it and the window root.

use tracing::trace;

use crate::{
    Capture, ElementId, Message, MouseButton, Ui, UiError, UpdateKind, WindowId,
    window::NO_POINTER,
};

/// A raw pointer event from the platform driver, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// The pointer moved.
    Move {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
    },
    /// A button went down.
    Down {
        /// Button pressed.
        button: MouseButton,
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
    },
    /// A button went up.
    Up {
        /// Button released.
        button: MouseButton,
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
    },
    /// The pointer left the window.
    Leave,
}

impl Ui {
    /// Routes one pointer event, then runs the update point.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWindow`] if the window is not active.
    pub fn handle_input(&mut self, window: WindowId, event: InputEvent) -> Result<(), UiError> {
        let entry = self
            .windows
            .get_mut(window)
            .ok_or(UiError::UnknownWindow(window))?;

        entry.pointer = match event {
            InputEvent::Move { x, y }
            | InputEvent::Down { x, y, .. }
            | InputEvent::Up { x, y, .. } => (x, y),
            // A captured pointer keeps its last position so the drag continues.
            InputEvent::Leave if entry.capture.is_some() => entry.pointer,
            InputEvent::Leave => NO_POINTER,
        };
        let (x, y) = entry.pointer;

        if let Some(capture) = entry.capture {
            self.route_captured(window, capture, event, x, y);
        }

        match self.windows.get(window).and_then(|w| w.capture) {
            Some(capture) => self.reconcile_captured_hover(window, capture, x, y),
            None => self.route_idle(window, event, x, y),
        }

        self.update();
        Ok(())
    }

    fn route_captured(
        &mut self,
        window: WindowId,
        capture: Capture,
        event: InputEvent,
        x: i32,
        y: i32,
    ) {
        let pressed = capture.element;
        match event {
            InputEvent::Move { .. } | InputEvent::Leave => {
                self.dispatch(pressed, Message::MouseDrag { x, y });
            }
            InputEvent::Up { button, .. } if button == capture.button => {
                let hovered = self.windows.get(window).map(|w| w.hovered);
                if hovered == Some(pressed) {
                    self.dispatch(pressed, Message::Clicked(button));
                }
                self.dispatch(pressed, Message::MouseUp(button));
                self.set_pressed(window, None, button);
            }
            InputEvent::Down { button, .. } | InputEvent::Up { button, .. } => {
                trace!(?window, ?button, held = ?capture.button, "button ignored while captured");
            }
        }
    }

    // While captured, hover may only move between the captured element and
    // the window root.
    fn reconcile_captured_hover(&mut self, window: WindowId, capture: Capture, x: i32, y: i32) {
        let pressed = capture.element;
        let inside = self
            .elements
            .get(pressed)
            .is_some_and(|entry| entry.clip.contains(x, y));
        let Some(entry) = self.windows.get_mut(window) else {
            return;
        };

        if inside && entry.hovered == entry.root {
            entry.hovered = pressed;
        } else if !inside && entry.hovered == pressed {
            entry.hovered = entry.root;
        } else {
            return;
        }
        trace!(?window, ?pressed, inside, "captured hover changed");
        self.dispatch(pressed, Message::Update(UpdateKind::Hovered));
    }

    fn route_idle(&mut self, window: WindowId, event: InputEvent, x: i32, y: i32) {
        let Some(root) = self.windows.get(window).map(|w| w.root) else {
            return;
        };
        let hit = self.find_by_point(root, x, y);

        match event {
            InputEvent::Move { .. } | InputEvent::Leave => {
                self.dispatch(hit, Message::MouseMove { x, y });
            }
            InputEvent::Down { button, .. } => {
                self.set_pressed(window, Some(hit), button);
                self.dispatch(hit, Message::MouseDown(button));
            }
            InputEvent::Up { .. } => {}
        }

        let Some(entry) = self.windows.get_mut(window) else {
            return;
        };
        if entry.hovered != hit {
            let previous = entry.hovered;
            entry.hovered = hit;
            trace!(?window, ?previous, ?hit, "hover changed");
            self.dispatch(previous, Message::Update(UpdateKind::Hovered));
            self.dispatch(hit, Message::Update(UpdateKind::Hovered));
        }
    }

    /// Moves the capture to `element` (or releases it) and notifies both the
    /// previous and the new holder with [`UpdateKind::Pressed`].
    pub(crate) fn set_pressed(
        &mut self,
        window: WindowId,
        element: Option<ElementId>,
        button: MouseButton,
    ) {
        let Some(entry) = self.windows.get_mut(window) else {
            return;
        };
        let previous = entry.pressed();
        entry.capture = element.map(|element| Capture { element, button });

        if let Some(previous) = previous {
            self.dispatch(previous, Message::Update(UpdateKind::Pressed));
        }
        if let Some(element) = element {
            self.dispatch(element, Message::Update(UpdateKind::Pressed));
        }
    }
}
