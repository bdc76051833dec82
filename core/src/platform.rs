//! Contract with the platform driver that puts pixels on screen.

use alloc::{rc::Rc, vec::Vec};
use core::{cell::RefCell, fmt::Debug};

use crate::{Rect, WindowId};

/// A painted window buffer ready to be shown.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Row-major pixels, `width * height` long.
    pub pixels: &'a [u32],
    /// Buffer width.
    pub width: i32,
    /// Buffer height.
    pub height: i32,
    /// The region repainted since the previous presentation.
    pub damage: Rect,
}

impl Frame<'_> {
    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let index = usize::try_from(y * self.width + x).ok()?;
        self.pixels.get(index).copied()
    }
}

/// Trait implemented by every surface the engine presents to.
pub trait Platform: Debug {
    /// Blits the damaged part of a window's buffer to the screen.
    fn present(&mut self, window: WindowId, frame: &Frame<'_>);

    /// Called once a window has been reclaimed and left the active set.
    fn window_destroyed(&mut self, window: WindowId) {
        let _ = window;
    }
}

/// A presentation captured by [`Headless`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Window that was presented.
    pub window: WindowId,
    /// Damage rectangle handed over with the buffer.
    pub damage: Rect,
    /// Buffer width.
    pub width: i32,
    /// Buffer height.
    pub height: i32,
    /// Copy of the buffer at presentation time.
    pub pixels: Vec<u32>,
}

impl Presentation {
    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        Frame {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            damage: self.damage,
        }
        .pixel(x, y)
    }
}

#[derive(Debug, Default)]
struct HeadlessLog {
    presented: Vec<Presentation>,
    destroyed: Vec<WindowId>,
}

/// In-memory platform that records presentations instead of showing them.
///
/// Clones share one log, so a driver can keep a handle after moving the
/// platform into a [`Ui`](crate::Ui).
#[derive(Debug, Clone, Default)]
pub struct Headless {
    log: Rc<RefCell<HeadlessLog>>,
}

impl Headless {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every presentation recorded so far, oldest first.
    #[must_use]
    pub fn presented(&self) -> Vec<Presentation> {
        self.log.borrow().presented.clone()
    }

    /// Returns the most recent presentation.
    #[must_use]
    pub fn last(&self) -> Option<Presentation> {
        self.log.borrow().presented.last().cloned()
    }

    /// Returns the windows reported as destroyed, in order.
    #[must_use]
    pub fn destroyed(&self) -> Vec<WindowId> {
        self.log.borrow().destroyed.clone()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        let mut log = self.log.borrow_mut();
        log.presented.clear();
        log.destroyed.clear();
    }
}

impl Platform for Headless {
    fn present(&mut self, window: WindowId, frame: &Frame<'_>) {
        self.log.borrow_mut().presented.push(Presentation {
            window,
            damage: frame.damage,
            width: frame.width,
            height: frame.height,
            pixels: frame.pixels.to_vec(),
        });
    }

    fn window_destroyed(&mut self, window: WindowId) {
        self.log.borrow_mut().destroyed.push(window);
    }
}
