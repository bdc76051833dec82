//! Edge insets applied inside a container's bounds.

use rivulet_core::Rect;

/// Distances from each edge of a rectangle, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Inset from the left edge.
    pub left: i32,
    /// Inset from the right edge.
    pub right: i32,
    /// Inset from the top edge.
    pub top: i32,
    /// Inset from the bottom edge.
    pub bottom: i32,
}

impl From<i32> for Insets {
    fn from(value: i32) -> Self {
        Self::all(value)
    }
}

impl Insets {
    /// Creates insets with explicit edges.
    #[must_use]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Returns equal insets on every edge.
    #[must_use]
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns symmetric vertical and horizontal insets.
    #[must_use]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(horizontal, horizontal, vertical, vertical)
    }

    /// Sum of the left and right insets.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Shrinks `rect` by these insets. The result may be invalid.
    #[must_use]
    pub const fn inset(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.left + self.left,
            rect.right - self.right,
            rect.top + self.top,
            rect.bottom - self.bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_each_edge() {
        let insets = Insets::new(1, 2, 3, 4);
        assert_eq!(
            insets.inset(Rect::new(0, 100, 0, 50)),
            Rect::new(1, 98, 3, 46)
        );
        assert_eq!(insets.horizontal(), 3);
        assert_eq!(insets.vertical(), 7);
    }

    #[test]
    fn oversized_insets_invalidate() {
        assert!(!Insets::all(10).inset(Rect::new(0, 15, 0, 15)).is_valid());
        assert_eq!(Insets::from(4), Insets::symmetric(4, 4));
    }
}
