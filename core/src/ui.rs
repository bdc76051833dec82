//! The registry owning every element and window.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use slotmap::SlotMap;
use tracing::debug;

use crate::{Element, ElementId, Headless, Platform, Window, WindowId};

/// Owns the element arena, the active windows and the platform surface.
///
/// There is no hidden global state: a driver creates one `Ui`, feeds it
/// events and drops it on shutdown.
pub struct Ui {
    pub(crate) elements: SlotMap<ElementId, Element>,
    pub(crate) windows: SlotMap<WindowId, Window>,
    pub(crate) platform: Box<dyn Platform>,
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("elements", &self.elements.len())
            .field("windows", &self.windows.len())
            .field("platform", &self.platform)
            .finish()
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::headless()
    }
}

impl Ui {
    /// Creates an empty registry presenting to `platform`.
    #[must_use]
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self {
            elements: SlotMap::with_key(),
            windows: SlotMap::with_key(),
            platform: Box::new(platform),
        }
    }

    /// Creates a registry backed by a fresh [`Headless`] surface.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(Headless::new())
    }

    /// Runs the update point: sweeps condemned elements, retires windows whose
    /// root was reclaimed and flushes pending damage of the rest.
    pub fn update(&mut self) {
        let windows: Vec<WindowId> = self.windows.keys().collect();
        for window in windows {
            let Some(root) = self.windows.get(window).map(|w| w.root) else {
                continue;
            };
            if self.sweep(root) {
                self.windows.remove(window);
                self.platform.window_destroyed(window);
                debug!(?window, "window removed");
            } else {
                self.flush(window);
            }
        }
    }

    /// Looks up an active window.
    #[must_use]
    pub fn window(&self, window: WindowId) -> Option<&Window> {
        self.windows.get(window)
    }

    /// Iterates over the active windows.
    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &Window)> + '_ {
        self.windows.iter()
    }

    /// Returns true while at least one window is active.
    #[must_use]
    pub fn has_windows(&self) -> bool {
        !self.windows.is_empty()
    }
}
