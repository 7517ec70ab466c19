//! Common types and traits for 2D sheet geometry.
//!
//! This module defines the size and orientation value types shared by the
//! model, the free-space tracker and the placement heuristic.

use serde::{Deserialize, Serialize};

/// Width and height of a rectangular object.
///
/// # Examples
/// ```
/// use cut_it_now::types::Size;
///
/// let door = Size::new(600.0, 1800.0);
/// assert_eq!(door.rotated(), Size::new(1800.0, 600.0));
/// assert_eq!(door.longest_side(), 1800.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Swaps width and height.
    #[inline]
    pub const fn rotated(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Size after applying an orientation.
    #[inline]
    pub const fn oriented(&self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Upright => *self,
            Orientation::Rotated => self.rotated(),
        }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Square pieces look the same in both orientations.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Component-wise `<=`, without tolerance.
    #[inline]
    pub fn fits_within(&self, outer: &Self) -> bool {
        self.width <= outer.width && self.height <= outer.height
    }
}

/// Orientation of a piece on the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Declared width along the sheet's X axis.
    Upright,
    /// Width and height swapped.
    Rotated,
}

impl Orientation {
    /// Orientations worth evaluating for a piece.
    ///
    /// Square pieces and pieces that must not rotate only have the upright
    /// candidate. Upright always comes first.
    pub fn candidates(size: Size, allow_rotation: bool) -> &'static [Orientation] {
        if allow_rotation && !size.is_square() {
            &[Orientation::Upright, Orientation::Rotated]
        } else {
            &[Orientation::Upright]
        }
    }

    #[inline]
    pub fn is_rotated(self) -> bool {
        matches!(self, Orientation::Rotated)
    }
}

/// Trait for objects with a 2D extent.
pub trait Dimensional {
    /// Returns the dimensions of the object.
    fn dimensions(&self) -> Size;

    /// Calculates the area.
    fn area(&self) -> f64 {
        self.dimensions().area()
    }

    /// Checks whether this object fits into `outer` in the given orientation.
    fn fits_in(&self, outer: &Size, orientation: Orientation) -> bool {
        self.dimensions().oriented(orientation).fits_within(outer)
    }
}

/// Validation helpers for raw numeric input.
pub mod validation {

    /// Validates a single dimension.
    ///
    /// Returns the reason text for invalid values.
    pub fn check_dimension(value: f64) -> Result<(), &'static str> {
        if value.is_nan() {
            return Err("must not be NaN");
        }
        if value.is_infinite() {
            return Err("must not be infinite");
        }
        if value <= 0.0 {
            return Err("must be positive");
        }
        Ok(())
    }
}
