//! Stacking panels: lay children out in a row or a column.
//!
//! A panel sizes its children in two passes. Children without a fill flag on
//! the primary axis are measured first; the space they leave, minus the gaps,
//! is split evenly between the children that fill it. On the cross axis a
//! child either fills the panel or is centered at its measured size.
//!
//! ```
//! use rivulet_core::{ElementFlags, Rect, Ui, WindowConfig};
//! use rivulet_layout::{Panel, PanelFlags};
//!
//! let mut ui = Ui::headless();
//! let window = ui.create_window(&WindowConfig::default().with_size(200, 40))?;
//! let root = ui.window(window).unwrap().root();
//! let row = Panel::new().gap(10).insert(&mut ui, root, PanelFlags::HORIZONTAL, ElementFlags::empty())?;
//! let cells: Vec<_> = (0..3)
//!     .map(|_| ui.create_element(row, ElementFlags::FILL, ()))
//!     .collect::<Result<_, _>>()?;
//! ui.layout_window(window)?;
//!
//! assert_eq!(ui.element(cells[1]).unwrap().bounds(), Rect::new(70, 130, 0, 40));
//! # Ok::<(), rivulet_core::UiError>(())
//! ```

use alloc::vec::Vec;

use rivulet_core::{ElementFlags, ElementId, Handler, Message, Rect, Ui, UiError};
use tracing::trace;

use crate::padding::Insets;

bitflags::bitflags! {
    /// Kind bits understood by [`Panel`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelFlags: u16 {
        /// Stack children left to right instead of top to bottom.
        const HORIZONTAL = 1 << 0;
    }
}

impl From<PanelFlags> for ElementFlags {
    fn from(flags: PanelFlags) -> Self {
        Self::from_kind(flags.bits())
    }
}

/// Direction children are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the primary axis of a panel with the given element flags.
    #[must_use]
    pub const fn of(flags: ElementFlags) -> Self {
        if PanelFlags::from_bits_truncate(flags.kind()).contains(PanelFlags::HORIZONTAL) {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Returns true if `flags` ask to fill along this axis.
    #[must_use]
    pub const fn fills(self, flags: ElementFlags) -> bool {
        match self {
            Self::Horizontal => flags.contains(ElementFlags::HORIZONTAL_FILL),
            Self::Vertical => flags.contains(ElementFlags::VERTICAL_FILL),
        }
    }

    /// Asks `element` for its extent along this axis, given its extent along
    /// the other one (0 if unknown).
    pub fn measure(self, ui: &mut Ui, element: ElementId, hint: i32) -> i32 {
        match self {
            Self::Horizontal => ui.dispatch(element, Message::GetWidth { height: hint }),
            Self::Vertical => ui.dispatch(element, Message::GetHeight { width: hint }),
        }
    }

    const fn extent(self, rect: Rect) -> i32 {
        match self {
            Self::Horizontal => rect.width(),
            Self::Vertical => rect.height(),
        }
    }

    // Leading inset, trailing inset.
    const fn insets(self, padding: Insets) -> (i32, i32) {
        match self {
            Self::Horizontal => (padding.left, padding.right),
            Self::Vertical => (padding.top, padding.bottom),
        }
    }
}

/// Class handler of a stacking container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panel {
    padding: Insets,
    gap: i32,
    background: Option<u32>,
}

impl Panel {
    /// Creates a panel with no padding, no gap and a transparent background.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            padding: Insets::all(0),
            gap: 0,
            background: None,
        }
    }

    /// Sets the padding between the bounds and the children.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Insets>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Sets the space between consecutive children.
    #[must_use]
    pub const fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    /// Fills the bounds with `color` before the children paint.
    #[must_use]
    pub const fn background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }

    /// Returns the configured padding.
    #[must_use]
    pub const fn insets(&self) -> Insets {
        self.padding
    }

    /// Returns the configured gap.
    #[must_use]
    pub const fn spacing(&self) -> i32 {
        self.gap
    }

    /// Creates an element under `parent` driven by this panel.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StaleElement`] if `parent` no longer exists.
    pub fn insert(
        self,
        ui: &mut Ui,
        parent: ElementId,
        kind: PanelFlags,
        flags: ElementFlags,
    ) -> Result<ElementId, UiError> {
        ui.create_element(parent, flags | ElementFlags::from(kind), self)
    }

    /// Runs the stacking algorithm over `bounds`.
    ///
    /// With `measure` set nothing is moved; either way the return value is
    /// the extent the children occupy along the primary axis, padding
    /// included.
    pub fn layout(&self, ui: &mut Ui, element: ElementId, bounds: Rect, measure: bool) -> i32 {
        let Some(entry) = ui.element(element) else {
            return 0;
        };
        let axis = Axis::of(entry.flags());
        let cross_axis = axis.cross();
        let children = visible_children(ui, element);

        let content = self.padding.inset(bounds);
        let primary_extent = axis.extent(content);
        let cross_extent = cross_axis.extent(content);
        let (leading, trailing) = axis.insets(self.padding);
        let (cross_leading, _) = cross_axis.insets(self.padding);

        let mut available = primary_extent;
        let mut fill_count = 0;
        for &(child, flags) in &children {
            if axis.fills(flags) {
                fill_count += 1;
            } else {
                available -= axis.measure(ui, child, cross_extent);
            }
        }

        let count = i32::try_from(children.len()).unwrap_or(i32::MAX);
        if count > 0 {
            available -= (count - 1) * self.gap;
        }
        let per_fill = if available > 0 && fill_count > 0 {
            available / fill_count
        } else {
            0
        };
        trace!(?element, ?axis, available, per_fill, measure, "panel layout");

        let mut position = leading;
        for (child, flags) in children {
            let fills_primary = axis.fills(flags);
            let cross = if cross_axis.fills(flags) {
                cross_extent
            } else {
                cross_axis.measure(ui, child, if fills_primary { per_fill } else { 0 })
            };
            let extent = if fills_primary {
                per_fill
            } else {
                axis.measure(ui, child, cross)
            };

            if !measure {
                let start = position;
                let end = position + extent;
                let cross_start = cross_leading + (cross_extent - cross) / 2;
                let cross_end = cross_leading + (cross_extent + cross) / 2;
                let rect = match axis {
                    Axis::Horizontal => Rect::new(
                        bounds.left + start,
                        bounds.left + end,
                        bounds.top + cross_start,
                        bounds.top + cross_end,
                    ),
                    Axis::Vertical => Rect::new(
                        bounds.left + cross_start,
                        bounds.left + cross_end,
                        bounds.top + start,
                        bounds.top + end,
                    ),
                };
                ui.move_element(child, rect, false);
            }
            position += extent + self.gap;
        }

        if count > 0 {
            position -= self.gap;
        }
        position + trailing
    }

    /// Returns the largest cross-axis extent among the children, plus the
    /// cross-axis padding.
    pub fn measure_cross(&self, ui: &mut Ui, element: ElementId) -> i32 {
        let Some(entry) = ui.element(element) else {
            return 0;
        };
        let cross_axis = Axis::of(entry.flags()).cross();
        let largest = visible_children(ui, element)
            .into_iter()
            .map(|(child, _)| cross_axis.measure(ui, child, 0))
            .fold(0, i32::max);
        let (leading, trailing) = cross_axis.insets(self.padding);
        largest + leading + trailing
    }
}

fn visible_children(ui: &Ui, element: ElementId) -> Vec<(ElementId, ElementFlags)> {
    ui.children(element)
        .iter()
        .filter_map(|&child| {
            ui.element(child)
                .filter(|entry| !entry.is_pending_destroy())
                .map(|entry| (child, entry.flags()))
        })
        .collect()
}

impl Handler for Panel {
    fn message(&self, ui: &mut Ui, element: ElementId, message: &mut Message<'_>) -> i32 {
        let Some(entry) = ui.element(element) else {
            return 0;
        };
        let (bounds, axis) = (entry.bounds(), Axis::of(entry.flags()));

        match message {
            Message::Paint(painter) => {
                if let Some(color) = self.background {
                    painter.fill(bounds, color);
                }
                0
            }
            Message::Layout => {
                self.layout(ui, element, bounds, false);
                ui.repaint(element, None);
                0
            }
            Message::GetWidth { height } => match axis {
                Axis::Horizontal => self.layout(ui, element, Rect::new(0, 0, 0, *height), true),
                Axis::Vertical => self.measure_cross(ui, element),
            },
            Message::GetHeight { width } => match axis {
                Axis::Horizontal => self.measure_cross(ui, element),
                Axis::Vertical => self.layout(ui, element, Rect::new(0, *width, 0, 0), true),
            },
            _ => 0,
        }
    }
}
