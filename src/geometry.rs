//! Geometric primitives for 2D sheet layouts.
//!
//! Predicates take an absolute length tolerance. Summed `f64` coordinates
//! drift by a few ulps, so callers pass `RELATIVE_TOLERANCE` scaled to the
//! sheet; a tolerance of `0.0` compares exactly.

use serde::Serialize;

use crate::types::{Dimensional, Size};

/// Axis-aligned rectangle in sheet-local coordinates.
///
/// `(x, y)` is the corner closest to the sheet origin; the rectangle spans
/// `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    #[inline]
    pub const fn at_origin(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge X coordinate.
    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    /// Far edge Y coordinate.
    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Dimensional for Rect {
    fn dimensions(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fraction of a sheet's longest side below which two lengths count as equal.
///
/// Summing decimal sizes such as `333.3` in `f64` drifts by a few ulps; this
/// tolerance absorbs the drift without admitting any physically meaningful
/// overlap.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Checks whether the interiors of two rectangles intersect by more than
/// `tolerance` on both axes.
///
/// Rectangles that only share an edge or a corner do not overlap. With a
/// tolerance of `0.0` the comparison is exact.
pub fn overlaps(a: &Rect, b: &Rect, tolerance: f64) -> bool {
    // Separated on either axis means no overlap
    !(a.x_max() <= b.x + tolerance
        || b.x_max() <= a.x + tolerance
        || a.y_max() <= b.y + tolerance
        || b.y_max() <= a.y + tolerance)
}

/// Checks whether `inner` lies within `outer`, touching edges included and
/// protrusions up to `tolerance` allowed.
pub fn contains(outer: &Rect, inner: &Rect, tolerance: f64) -> bool {
    inner.x + tolerance >= outer.x
        && inner.y + tolerance >= outer.y
        && inner.x_max() <= outer.x_max() + tolerance
        && inner.y_max() <= outer.y_max() + tolerance
}

/// Area of a rectangle.
pub fn area(r: &Rect) -> f64 {
    r.area()
}
