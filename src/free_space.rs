//! Free-space tracking with guillotine splits.
//!
//! Every sheet starts with a single free region covering the whole sheet.
//! Placing a piece in the top-left corner of a region replaces that region
//! with at most two remainders:
//!
//! ```text
//! +-------+-------+
//! | piece | right |
//! +-------+       |
//! |bottom |       |
//! +-------+-------+
//! ```
//!
//! The right remainder spans the full region height, the bottom remainder the
//! piece width. Regions are stored by their edge coordinates and remainders
//! reuse those edges verbatim, so neighbouring regions share bit-identical
//! boundaries and rounding never makes them overlap.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::InvariantViolation;
use crate::geometry::Rect;
use crate::model::Sheet;
use crate::types::{Orientation, Size};

/// Free rectangle `[x0, x1) × [y0, y1)` on a sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreeRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl FreeRegion {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether a piece of `size` anchored at the corner stays within the far
    /// edges, allowing a protrusion of `tolerance`.
    fn holds(&self, size: Size, tolerance: f64) -> bool {
        self.x0 + size.width <= self.x1 + tolerance && self.y0 + size.height <= self.y1 + tolerance
    }

    /// Interior intersection, compared on the stored edges without tolerance.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

impl From<Rect> for FreeRegion {
    fn from(r: Rect) -> Self {
        Self::new(r.x, r.y, r.x_max(), r.y_max())
    }
}

/// Chosen region and orientation for one piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Free region the piece goes into.
    pub region: FreeRegion,
    pub orientation: Orientation,
    /// Piece size after applying `orientation`.
    pub footprint: Size,
    score: FitScore,
}

impl Fit {
    /// Area left in the region after placing the piece.
    pub fn leftover_area(&self) -> f64 {
        self.score.leftover_area
    }

    /// Where the piece ends up: the region's corner.
    pub fn footprint_rect(&self) -> Rect {
        Rect::new(
            self.region.x0,
            self.region.y0,
            self.footprint.width,
            self.footprint.height,
        )
    }
}

/// Ranking of a candidate fit. Lower is better in every component.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FitScore {
    leftover_area: f64,
    short_side_leftover: f64,
    y: f64,
    x: f64,
    orientation: Orientation,
}

impl FitScore {
    fn new(region: &FreeRegion, footprint: Size, orientation: Orientation) -> Self {
        Self {
            leftover_area: region.area() - footprint.area(),
            short_side_leftover: (region.x1 - (region.x0 + footprint.width))
                .min(region.y1 - (region.y0 + footprint.height)),
            y: region.y0,
            x: region.x0,
            orientation,
        }
    }

    /// Total order: leftover area, short-side leftover, y, x, upright first.
    fn compare(&self, other: &Self) -> Ordering {
        self.leftover_area
            .total_cmp(&other.leftover_area)
            .then_with(|| self.short_side_leftover.total_cmp(&other.short_side_leftover))
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.orientation.cmp(&other.orientation))
    }
}

/// Free regions per sheet of one run.
#[derive(Clone, Debug, Default)]
pub struct FreeSpaceTracker {
    sheets: BTreeMap<usize, Vec<FreeRegion>>,
    /// Length below which edges count as coincident, see [`Sheet::length_tolerance`].
    tolerance: f64,
}

impl FreeSpaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a sheet with one region covering all of it.
    pub fn open_sheet(&mut self, sheet_index: usize, sheet: &Sheet) {
        self.tolerance = sheet.length_tolerance();
        self.sheets
            .insert(sheet_index, vec![FreeRegion::from(sheet.bounds())]);
    }

    /// Free regions of a sheet, empty for sheets never opened.
    pub fn regions(&self, sheet_index: usize) -> &[FreeRegion] {
        self.sheets
            .get(&sheet_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn free_area(&self, sheet_index: usize) -> f64 {
        self.regions(sheet_index).iter().map(FreeRegion::area).sum()
    }

    /// Best-area-fit search over the free regions of one sheet.
    ///
    /// Evaluates the upright orientation and, when `allow_rotation` is set and
    /// the piece is not square, the rotated one. Returns `None` when no region
    /// holds the piece in any evaluated orientation.
    pub fn best_fit(&self, sheet_index: usize, size: Size, allow_rotation: bool) -> Option<Fit> {
        let mut best: Option<Fit> = None;

        for region in self.regions(sheet_index) {
            for &orientation in Orientation::candidates(size, allow_rotation) {
                let footprint = size.oriented(orientation);
                if !region.holds(footprint, self.tolerance) {
                    continue;
                }

                let candidate = Fit {
                    region: *region,
                    orientation,
                    footprint,
                    score: FitScore::new(region, footprint, orientation),
                };
                let improves = match &best {
                    None => true,
                    Some(current) => candidate.score.compare(&current.score) == Ordering::Less,
                };
                if improves {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    /// Commits a fit returned by [`best_fit`](Self::best_fit).
    ///
    /// Removes the region and inserts its guillotine remainders. Remainders
    /// no wider than the tolerance are dropped. Returns the rectangle now
    /// occupied by the piece.
    pub fn place(&mut self, sheet_index: usize, fit: &Fit) -> Result<Rect, InvariantViolation> {
        let tolerance = self.tolerance;
        let regions = self
            .sheets
            .get_mut(&sheet_index)
            .ok_or(InvariantViolation::UnknownSheet { sheet_index })?;
        let position = regions
            .iter()
            .position(|r| *r == fit.region)
            .ok_or(InvariantViolation::StaleRegion { sheet_index })?;
        let region = regions.swap_remove(position);

        // A piece within tolerance of the far edge is cut flush with it
        let cut_x = (region.x0 + fit.footprint.width).min(region.x1);
        let cut_y = (region.y0 + fit.footprint.height).min(region.y1);
        let right = FreeRegion::new(cut_x, region.y0, region.x1, region.y1);
        let bottom = FreeRegion::new(region.x0, cut_y, cut_x, region.y1);
        regions.extend(
            [right, bottom]
                .into_iter()
                .filter(|r| r.width() > tolerance && r.height() > tolerance),
        );

        #[cfg(debug_assertions)]
        self.check_disjoint(sheet_index)?;

        Ok(fit.footprint_rect())
    }

    /// Verifies that no two free regions of a sheet overlap.
    pub fn check_disjoint(&self, sheet_index: usize) -> Result<(), InvariantViolation> {
        let regions = self.regions(sheet_index);
        for (i, a) in regions.iter().enumerate() {
            if regions[i + 1..].iter().any(|b| a.overlaps(b)) {
                return Err(InvariantViolation::OverlappingFreeSpace { sheet_index });
            }
        }
        Ok(())
    }
}
