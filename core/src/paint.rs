//! Damage accumulation and the clipped paint traversal.

use alloc::vec::Vec;
use core::{fmt, mem};

use tracing::trace;

use crate::{ElementId, Frame, Message, Rect, Ui, WindowId};

/// Payload of [`Message::Paint`]: a window's pixel buffer plus the clip the
/// receiving element may draw into.
pub struct Painter {
    clip: Rect,
    width: i32,
    height: i32,
    bits: Vec<u32>,
}

impl fmt::Debug for Painter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Painter")
            .field("clip", &self.clip)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Painter {
    pub(crate) const fn new(clip: Rect, width: i32, height: i32, bits: Vec<u32>) -> Self {
        Self {
            clip,
            width,
            height,
            bits,
        }
    }

    /// Returns the active clip. Always inside the buffer.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Returns the buffer width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Returns the buffer height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Writes one pixel. Pixels outside the active clip are discarded.
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if !self.clip.contains(x, y) {
            return;
        }
        // The clip never leaves the buffer, so the index is in range.
        if let Ok(index) = usize::try_from(y * self.width + x) {
            if let Some(pixel) = self.bits.get_mut(index) {
                *pixel = color;
            }
        }
    }

    /// Fills the part of `rect` inside the active clip.
    pub fn fill(&mut self, rect: Rect, color: u32) {
        let area = rect.intersection(self.clip);
        if !area.is_valid() {
            return;
        }
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                self.put(x, y, color);
            }
        }
    }

    /// Returns the pixel at `(x, y)` regardless of the clip.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        Frame {
            pixels: &self.bits,
            width: self.width,
            height: self.height,
            damage: self.clip,
        }
        .pixel(x, y)
    }
}

impl Ui {
    /// Requests a repaint of `region` (the element's bounds if `None`).
    ///
    /// The region is clipped to the element and merged into the window's
    /// single damage rectangle as a bounding union. Requests that clip to
    /// nothing are dropped.
    pub fn repaint(&mut self, element: ElementId, region: Option<Rect>) {
        let Some(entry) = self.elements.get(element) else {
            return;
        };
        let region = region.unwrap_or(entry.bounds).intersection(entry.clip);
        if !region.is_valid() {
            return;
        }
        if let Some(window) = self.windows.get_mut(entry.window) {
            window.damage = window.damage.union(region);
            trace!(?element, ?region, damage = ?window.damage, "damage merged");
        }
    }

    /// Paints and presents a window if it has pending damage.
    pub(crate) fn flush(&mut self, window: WindowId) {
        let Some(entry) = self.windows.get_mut(window) else {
            return;
        };
        if !entry.damage.is_valid() {
            return;
        }
        let clip = entry.client_rect().intersection(entry.damage);
        let (root, width, height) = (entry.root, entry.width, entry.height);
        let mut painter = Painter::new(clip, width, height, mem::take(&mut entry.bits));
        trace!(?window, ?clip, "flushing damage");

        self.paint(root, &mut painter);

        let Some(entry) = self.windows.get_mut(window) else {
            return;
        };
        entry.bits = painter.bits;
        entry.damage = Rect::INVALID;
        let frame = Frame {
            pixels: &entry.bits,
            width,
            height,
            damage: clip,
        };
        self.platform.present(window, &frame);
    }

    // Pre-order walk; each node sees its own clip narrowed by the painter's,
    // and every child starts from its parent's narrowed clip.
    fn paint(&mut self, element: ElementId, painter: &mut Painter) {
        let Some(entry) = self.elements.get(element) else {
            return;
        };
        let outer = painter.clip;
        let clip = entry.clip.intersection(outer);
        if !clip.is_valid() {
            return;
        }
        let children = entry.children.clone();

        painter.clip = clip;
        self.dispatch(element, Message::Paint(&mut *painter));
        for child in children {
            painter.clip = clip;
            self.paint(child, painter);
        }
        painter.clip = outer;
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, vec, vec::Vec};
    use core::cell::RefCell;

    use crate::{ElementFlags, Headless, Message, Rect, Ui, WindowConfig, handler};

    fn fill_with(color: u32) -> impl crate::Handler {
        handler(move |_, _, message| {
            if let Message::Paint(painter) = message {
                let clip = painter.clip();
                painter.fill(clip, color);
            }
            0
        })
    }

    #[test]
    fn disjoint_repaints_coalesce_into_their_bounding_union() {
        let headless = Headless::new();
        let mut ui = Ui::new(headless.clone());
        let window = ui
            .create_window(&WindowConfig::default().with_size(100, 100))
            .unwrap();
        let root = ui.window(window).unwrap().root();

        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(50, 60, 40, 50);
        ui.repaint(root, Some(a));
        ui.repaint(root, Some(b));

        let damage = ui.window(window).unwrap().damage();
        assert_eq!(damage, Rect::new(0, 60, 0, 50));
        assert!(damage.contains_rect(a) && damage != a);
        assert!(damage.contains_rect(b) && damage != b);

        ui.update();
        let frame = headless.last().unwrap();
        assert_eq!(frame.damage, Rect::new(0, 60, 0, 50));
        assert!(!ui.window(window).unwrap().damage().is_valid());
    }

    #[test]
    fn repaint_is_clipped_to_the_element() {
        let mut ui = Ui::headless();
        let window = ui
            .create_window(&WindowConfig::default().with_size(100, 100))
            .unwrap();
        let root = ui.window(window).unwrap().root();
        let child = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        ui.move_element(child, Rect::new(80, 120, 80, 120), false);

        ui.repaint(child, None);
        assert_eq!(ui.window(window).unwrap().damage(), Rect::new(80, 100, 80, 100));

        ui.update();
        let offscreen = ui.create_element(root, ElementFlags::empty(), ()).unwrap();
        ui.move_element(offscreen, Rect::new(200, 300, 0, 10), false);
        ui.repaint(offscreen, None);
        assert!(!ui.window(window).unwrap().damage().is_valid());
    }

    #[test]
    fn paint_narrows_clips_and_prunes_outside_damage() {
        let headless = Headless::new();
        let mut ui = Ui::new(headless.clone());
        let window = ui
            .create_window(&WindowConfig::default().with_size(100, 100))
            .unwrap();
        let root = ui.window(window).unwrap().root();

        let clips = Rc::new(RefCell::new(Vec::new()));
        let spy = |name: &'static str| {
            let clips = clips.clone();
            handler(move |_, _, message| {
                if let Message::Paint(painter) = message {
                    clips.borrow_mut().push((name, painter.clip()));
                }
                0
            })
        };

        let left = ui.create_element(root, ElementFlags::empty(), spy("left")).unwrap();
        let right = ui.create_element(root, ElementFlags::empty(), spy("right")).unwrap();
        let inner = ui.create_element(left, ElementFlags::empty(), spy("inner")).unwrap();
        ui.move_element(left, Rect::new(0, 50, 0, 100), false);
        ui.move_element(right, Rect::new(50, 100, 0, 100), false);
        ui.move_element(inner, Rect::new(10, 90, 10, 20), false);

        ui.repaint(root, Some(Rect::new(0, 40, 0, 15)));
        ui.update();

        assert_eq!(
            *clips.borrow(),
            vec![
                ("left", Rect::new(0, 40, 0, 15)),
                ("inner", Rect::new(10, 40, 10, 15)),
            ]
        );
        assert_eq!(headless.presented().len(), 1);
    }

    #[test]
    fn painted_pixels_stay_inside_the_damage() {
        let headless = Headless::new();
        let mut ui = Ui::new(headless.clone());
        let window = ui
            .create_window(&WindowConfig::default().with_size(20, 20))
            .unwrap();
        let root = ui.window(window).unwrap().root();
        let child = ui.create_element(root, ElementFlags::empty(), fill_with(7)).unwrap();
        ui.move_element(child, Rect::new(0, 20, 0, 20), false);

        ui.repaint(child, Some(Rect::new(5, 10, 5, 10)));
        ui.update();

        let frame = headless.last().unwrap();
        assert_eq!(frame.pixel(5, 5), Some(7));
        assert_eq!(frame.pixel(9, 9), Some(7));
        assert_eq!(frame.pixel(10, 10), Some(0));
        assert_eq!(frame.pixel(0, 0), Some(0));
        assert_eq!(ui.window(window).unwrap().pixels()[5 * 20 + 5], 7);
    }

    #[test]
    fn nothing_is_presented_without_damage() {
        let headless = Headless::new();
        let mut ui = Ui::new(headless.clone());
        ui.create_window(&WindowConfig::default()).unwrap();
        ui.update();
        assert!(headless.presented().is_empty());
    }
}
