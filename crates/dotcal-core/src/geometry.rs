#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Everything here is in CSS pixels with the origin at the top-left of the
//! window: `x` grows to the right, `y` grows downward. Values are `f64`
//! because bounding boxes measured from the page are fractional.

use serde::{Deserialize, Serialize};

/// A screen-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// The origin, also used as the fallback for unmeasured targets.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by the given deltas.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Width and height of a rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow both dimensions by `amount`.
    #[inline]
    #[must_use]
    pub fn expand(self, amount: f64) -> Self {
        Self::new(self.width + amount, self.height + amount)
    }

    /// Check if either dimension is zero (or negative).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A measured element box, laid out like a DOM bounding client rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DomRect {
    /// Distance from the top of the window to the top edge.
    pub top: f64,
    /// Distance from the left of the window to the left edge.
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl DomRect {
    /// Create a new rect.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Build a rect from its top-left corner and a size.
    #[inline]
    pub fn from_origin(origin: Coordinate, size: Size) -> Self {
        Self::new(origin.y, origin.x, size.width, size.height)
    }
}

/// The visible window area, anchored at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal midpoint of the window.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Vertical midpoint of the window.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Check whether a box at `origin` with `size` lies entirely on screen.
    ///
    /// Edges touching the window border count as on screen.
    pub fn contains_box(&self, origin: Coordinate, size: Size) -> bool {
        origin.x >= 0.0
            && origin.y >= 0.0
            && origin.x + size.width <= self.width
            && origin.y + size.height <= self.height
    }

    /// Check whether the top-left corner of `rect` is outside the window.
    ///
    /// This is the test used to decide whether a tour target must be
    /// scrolled into view before the popover can point at it.
    pub fn is_out_of_view(&self, rect: &DomRect) -> bool {
        rect.top < 0.0 || rect.top > self.height || rect.left < 0.0 || rect.left > self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, DomRect, Size, Viewport};

    #[test]
    fn rect_edges_and_midpoints() {
        let rect = DomRect::new(100.0, 50.0, 40.0, 20.0);
        assert_eq!(rect.right(), 90.0);
        assert_eq!(rect.bottom(), 120.0);
        assert_eq!(rect.center_x(), 70.0);
        assert_eq!(rect.center_y(), 110.0);
    }

    #[test]
    fn rect_from_origin_swaps_axes() {
        let rect = DomRect::from_origin(Coordinate::new(3.0, 7.0), Size::new(10.0, 5.0));
        assert_eq!(rect, DomRect::new(7.0, 3.0, 10.0, 5.0));
    }

    #[test]
    fn viewport_contains_box_edges() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.contains_box(Coordinate::ZERO, Size::new(800.0, 600.0)));
        assert!(!vp.contains_box(Coordinate::new(-0.5, 0.0), Size::new(10.0, 10.0)));
        assert!(!vp.contains_box(Coordinate::new(0.0, 595.0), Size::new(10.0, 10.0)));
        assert!(!vp.contains_box(Coordinate::new(795.0, 0.0), Size::new(10.0, 10.0)));
    }

    #[test]
    fn out_of_view_checks_top_left_corner() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(!vp.is_out_of_view(&DomRect::new(590.0, 10.0, 10.0, 50.0)));
        assert!(vp.is_out_of_view(&DomRect::new(601.0, 10.0, 10.0, 10.0)));
        assert!(vp.is_out_of_view(&DomRect::new(-1.0, 10.0, 10.0, 10.0)));
        assert!(vp.is_out_of_view(&DomRect::new(10.0, 801.0, 10.0, 10.0)));
    }

    #[test]
    fn lerp_clamps_progress() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(10.0, -20.0);
        assert_eq!(a.lerp(b, 0.5), Coordinate::new(5.0, -10.0));
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn size_expand_and_empty() {
        assert_eq!(Size::new(10.0, 4.0).expand(48.0), Size::new(58.0, 52.0));
        assert!(Size::default().is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
