//! Windows: a root element plus the per-window paint and input state.

use alloc::{rc::Rc, string::String, vec, vec::Vec};
use core::fmt;

use tracing::debug;

use crate::{
    Element, ElementFlags, ElementId, Handler, Message, MouseButton, Rect, Ui, UiError,
};

// Pointer position reported after the pointer leaves the window.
pub(crate) const NO_POINTER: (i32, i32) = (-1, -1);

slotmap::new_key_type! {
    /// Handle to an active window.
    pub struct WindowId;
}

/// Settings for a new window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    /// Title handed to the platform.
    pub title: String,
    /// Client width in pixels.
    pub width: i32,
    /// Client height in pixels.
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the client size.
    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// The element holding a pointer button, and which button it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Element the button went down on.
    pub element: ElementId,
    /// Button being held.
    pub button: MouseButton,
}

/// An active window.
pub struct Window {
    pub(crate) root: ElementId,
    pub(crate) title: String,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) bits: Vec<u32>,
    pub(crate) damage: Rect,
    pub(crate) pointer: (i32, i32),
    pub(crate) hovered: ElementId,
    pub(crate) capture: Option<Capture>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("root", &self.root)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("damage", &self.damage)
            .field("pointer", &self.pointer)
            .field("hovered", &self.hovered)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the client width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Returns the client height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns the client rectangle `(0, width, 0, height)`.
    #[must_use]
    pub const fn client_rect(&self) -> Rect {
        Rect::new(0, self.width, 0, self.height)
    }

    /// Returns the pending damage, invalid when nothing needs repainting.
    #[must_use]
    pub const fn damage(&self) -> Rect {
        self.damage
    }

    /// Returns the last pointer position, `(-1, -1)` after the pointer left.
    #[must_use]
    pub const fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Returns the hovered element. Defaults to the root.
    #[must_use]
    pub const fn hovered(&self) -> ElementId {
        self.hovered
    }

    /// Returns the element holding the pointer capture.
    #[must_use]
    pub fn pressed(&self) -> Option<ElementId> {
        self.capture.map(|capture| capture.element)
    }

    /// Returns the current capture, `None` while no button is held.
    #[must_use]
    pub const fn capture(&self) -> Option<Capture> {
        self.capture
    }

    /// Returns the pixel buffer as last presented.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.bits
    }
}

/// Class handler of every window root: stretches the first child over the
/// whole client area.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowRoot;

impl Handler for WindowRoot {
    fn message(&self, ui: &mut Ui, element: ElementId, message: &mut Message<'_>) -> i32 {
        if matches!(message, Message::Layout) {
            let Some(root) = ui.element(element) else {
                return 0;
            };
            let (bounds, first) = (root.bounds, root.children.first().copied());
            if let Some(child) = first {
                ui.move_element(child, bounds, false);
            }
            ui.repaint(element, None);
        }
        0
    }
}

fn buffer_len(width: i32, height: i32) -> usize {
    width.unsigned_abs() as usize * height.unsigned_abs() as usize
}

const fn check_size(width: i32, height: i32) -> Result<(), UiError> {
    if width > 0 && height > 0 {
        Ok(())
    } else {
        Err(UiError::InvalidSize { width, height })
    }
}

impl Ui {
    /// Creates a window and its root element.
    ///
    /// The root covers the client area and starts hovered. Nothing is laid out
    /// or painted until [`Ui::layout_window`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidSize`] for a non-positive width or height.
    pub fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId, UiError> {
        let (width, height) = (config.width, config.height);
        check_size(width, height)?;

        let elements = &mut self.elements;
        let window = self.windows.insert_with_key(|window| {
            let client = Rect::new(0, width, 0, height);
            let class: Rc<dyn Handler> = Rc::new(WindowRoot);
            let mut root = Element::new(None, window, ElementFlags::empty(), Some(class));
            root.bounds = client;
            root.clip = client;
            let root = elements.insert(root);
            Window {
                root,
                title: config.title.clone(),
                width,
                height,
                bits: vec![0; buffer_len(width, height)],
                damage: Rect::INVALID,
                pointer: NO_POINTER,
                hovered: root,
                capture: None,
            }
        });

        debug!(?window, title = %config.title, width, height, "window created");
        Ok(window)
    }

    /// Lays out a window from its root and runs the update point.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWindow`] if the window is not active.
    pub fn layout_window(&mut self, window: WindowId) -> Result<(), UiError> {
        let root = self
            .windows
            .get(window)
            .map(|w| w.root)
            .ok_or(UiError::UnknownWindow(window))?;
        self.dispatch(root, Message::Layout);
        self.update();
        Ok(())
    }

    /// Resizes a window: reallocates its buffer, resets the root to the new
    /// client area, lays it out and runs the update point.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownWindow`] if the window is not active and
    /// [`UiError::InvalidSize`] for a non-positive width or height.
    pub fn resize_window(
        &mut self,
        window: WindowId,
        width: i32,
        height: i32,
    ) -> Result<(), UiError> {
        check_size(width, height)?;
        let entry = self
            .windows
            .get_mut(window)
            .ok_or(UiError::UnknownWindow(window))?;
        entry.width = width;
        entry.height = height;
        entry.bits = vec![0; buffer_len(width, height)];
        entry.damage = Rect::INVALID;
        let root = entry.root;

        let client = Rect::new(0, width, 0, height);
        if let Some(root) = self.elements.get_mut(root) {
            root.bounds = client;
            root.clip = client;
        }
        debug!(?window, width, height, "window resized");

        self.dispatch(root, Message::Layout);
        self.update();
        Ok(())
    }
}
