//! Geometry primitives: points and rectangles in display coordinates.
//!
//! Both types are plain `Copy` values with chainable arithmetic, matching how
//! the editing code composes them (`position.add(delta).round()`); nothing
//! here mutates shared state, so previous values survive any edit.

use serde::{Deserialize, Serialize};

/// A 2D point (or size, or delta) in display pixels.
///
/// Coordinates stay `f32` while an edit is in flight and are snapped with
/// [`Point::round`] when they land in layer geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Point {
    /// Create a point from components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Both components as a `[x, y]` pair (the persisted `p` shape).
    #[must_use]
    pub const fn xy(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Component-wise addition.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Add scalar offsets to each component.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise subtraction.
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Scale both components.
    #[must_use]
    pub fn multiply(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divide both components.
    #[must_use]
    pub fn divide(self, divisor: f32) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }

    /// Round both components to the nearest integer device unit.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamp the point so it lies inside `rect` (inclusive of its edges).
    ///
    /// Used by keyboard nudging to keep a layer fully on the display: the
    /// rect passed in is `[0,0] .. display - layer_size`.
    #[must_use]
    pub fn bound_to(self, rect: Rect) -> Self {
        Self::new(
            self.x.clamp(rect.x, rect.x + rect.w),
            self.y.clamp(rect.y, rect.y + rect.h),
        )
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        let d = self.subtract(other);
        d.x.hypot(d.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from(pair: [f32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// An axis-aligned rectangle: position plus non-negative size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (`>= 0`).
    pub w: f32,
    /// Height (`>= 0`).
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    ///
    /// Negative sizes are clamped to zero to keep the `w,h >= 0` invariant.
    #[must_use]
    pub fn new(position: Point, size: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.x.max(0.0),
            h: size.y.max(0.0),
        }
    }

    /// Create a rectangle spanning two arbitrary corner points.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        let min = a.min(b);
        Self::new(min, a.max(b).subtract(min))
    }

    /// Top-left corner as a point.
    #[must_use]
    pub const fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size as a point.
    #[must_use]
    pub const fn size(self) -> Point {
        Point::new(self.w, self.h)
    }

    /// Whether the point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    /// Whether two rectangles overlap.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }

    /// Scale position and size by a factor.
    #[must_use]
    pub fn multiply(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            w: self.w * factor,
            h: self.h * factor,
        }
    }

    /// Round all fields to integer device units.
    #[must_use]
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
            w: self.w.round(),
            h: self.h.round(),
        }
    }

    /// Shift the edges: offsets the position by `(dx, dy)` and grows the
    /// size by `(dw, dh)`. The overlay uses `adjust(-0.5, -0.5, 1.0, 1.0)`
    /// to pixel-snap 1px strokes around scaled bounds.
    #[must_use]
    pub fn adjust(self, dx: f32, dy: f32, dw: f32, dh: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: (self.w + dw).max(0.0),
            h: (self.h + dh).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_chained_arithmetic() {
        let p = Point::new(3.2, 7.8)
            .add(Point::new(1.0, 1.0))
            .subtract(Point::new(0.2, 0.8))
            .round();
        assert_eq!(p, Point::new(4.0, 8.0));
    }

    #[test]
    fn test_point_value_semantics() {
        let original = Point::new(5.0, 5.0);
        let moved = original.add(Point::new(2.0, 0.0));
        // `original` is untouched; edits work on copies.
        assert_eq!(original, Point::new(5.0, 5.0));
        assert_eq!(moved, Point::new(7.0, 5.0));
    }

    #[test]
    fn test_point_bound_to_clamps_both_axes() {
        let bounds = Rect::new(Point::ZERO, Point::new(100.0, 50.0));
        assert_eq!(
            Point::new(-3.0, 20.0).bound_to(bounds),
            Point::new(0.0, 20.0)
        );
        assert_eq!(
            Point::new(120.0, 80.0).bound_to(bounds),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            Point::new(40.0, 10.0).bound_to(bounds),
            Point::new(40.0, 10.0)
        );
    }

    #[test]
    fn test_point_distance_is_euclidean() {
        // 3-4-5 triangle.
        let d = Point::new(1.0, 2.0).distance_to(Point::new(4.0, 6.0));
        assert!((d - 5.0).abs() < f32::EPSILON);
        assert_eq!(Point::new(7.0, 7.0).distance_to(Point::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_rect_intersects_is_symmetric() {
        let a = Rect::new(Point::ZERO, Point::new(10.0, 10.0));
        let b = Rect::new(Point::new(8.0, 8.0), Point::new(5.0, 5.0));
        let apart = Rect::new(Point::new(20.0, 0.0), Point::new(3.0, 3.0));
        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(apart));
        assert!(!apart.intersects(a));
    }

    #[test]
    fn test_rect_clamps_negative_size() {
        let r = Rect::new(Point::new(4.0, 4.0), Point::new(-2.0, 3.0));
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 3.0);
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(Point::new(10.0, 10.0), Point::new(5.0, 5.0));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(15.0, 15.0)));
        assert!(!r.contains(Point::new(15.1, 15.0)));
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(8.0, 2.0), Point::new(3.0, 9.0));
        assert_eq!(r, Rect::new(Point::new(3.0, 2.0), Point::new(5.0, 7.0)));
    }

    #[test]
    fn test_rect_adjust_overlay_arithmetic() {
        let r = Rect::new(Point::new(10.0, 20.0), Point::new(4.0, 6.0));
        let crisp = r.multiply(2.0).round().adjust(-0.5, -0.5, 1.0, 1.0);
        assert_eq!(crisp.x, 19.5);
        assert_eq!(crisp.y, 39.5);
        assert_eq!(crisp.w, 9.0);
        assert_eq!(crisp.h, 13.0);
    }
}
