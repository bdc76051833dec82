//! Axis-aligned rectangle algebra in integer pixel coordinates.
//!
//! Rectangles are half-open: a [`Rect`] covers the pixels `left..right` by
//! `top..bottom`. A rectangle whose width or height is not positive is
//! *invalid*. Invalid rectangles are never an error; every operation that
//! consumes rectangles treats them as "nothing to contribute".

/// Axis-aligned rectangle stored as its four edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// The canonical empty rectangle.
    pub const INVALID: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its edges.
    #[must_use]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    /// Returns the horizontal extent, which is not positive for invalid rectangles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Returns the vertical extent, which is not positive for invalid rectangles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns true if the rectangle has a positive width and height.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.right > self.left && self.bottom > self.top
    }

    /// Returns the overlap of the two rectangles.
    ///
    /// The result is invalid when they do not overlap, and stays invalid if
    /// either input was.
    #[must_use]
    pub fn intersection(&self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            right: self.right.min(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Returns the smallest rectangle containing both inputs.
    ///
    /// This is the raw edge-wise bound; see [`Rect::union`] for the variant
    /// that ignores invalid inputs.
    #[must_use]
    pub fn bounding(&self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Bounding union where an invalid operand contributes nothing.
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        match (self.is_valid(), other.is_valid()) {
            (true, true) => self.bounding(other),
            (true, false) => *self,
            (false, true) => other,
            (false, false) => Self::INVALID,
        }
    }

    /// Returns true if the pixel whose top-left corner is `(x, y)` lies inside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Returns true if every pixel of `other` lies inside `self`.
    ///
    /// An invalid `other` covers no pixels and is contained by anything.
    #[must_use]
    pub const fn contains_rect(&self, other: Self) -> bool {
        !other.is_valid()
            || (other.left >= self.left
                && other.right <= self.right
                && other.top >= self.top
                && other.bottom <= self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(5, 15, 2, 8);
        assert_eq!(a.intersection(b), Rect::new(5, 10, 2, 8));
    }

    #[test]
    fn disjoint_rects_have_invalid_intersection() {
        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(20, 30, 0, 10);
        assert!(!a.intersection(b).is_valid());
        assert!(!a.intersection(Rect::INVALID).is_valid());
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(10, 20, 0, 10);
        assert!(!a.intersection(b).is_valid());
    }

    #[test]
    fn union_ignores_invalid_operands() {
        let a = Rect::new(0, 10, 0, 10);
        assert_eq!(a.union(Rect::INVALID), a);
        assert_eq!(Rect::INVALID.union(a), a);
        assert!(!Rect::INVALID.union(Rect::new(5, 1, 0, 3)).is_valid());
        assert_eq!(
            a.union(Rect::new(20, 30, 40, 50)),
            Rect::new(0, 30, 0, 50)
        );
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::from_xywh(10, 20, 5, 5);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 24));
        assert!(!r.contains(15, 24));
        assert!(!r.contains(14, 25));
        assert!(!Rect::INVALID.contains(0, 0));
    }

    #[test]
    fn containment_of_rects() {
        let outer = Rect::new(0, 100, 0, 100);
        assert!(outer.contains_rect(Rect::new(10, 20, 10, 20)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(Rect::new(90, 110, 10, 20)));
        assert!(outer.contains_rect(Rect::new(500, 400, 0, 0)));
    }
}
