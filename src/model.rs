//! Data models for sheet cutting optimization.
//!
//! This module defines the fundamental data structures of a cutting run:
//! - `Sheet`: One physical stock unit
//! - `Piece`: A rectangular demand to be cut from stock
//! - `Placement`: A piece positioned on a specific sheet
//! - `OptimizationResult`: Placements of a run plus per-sheet summaries

use serde::{Deserialize, Serialize};

use crate::error::{PieceId, ValidationError};
use crate::geometry::{RELATIVE_TOLERANCE, Rect, area};
use crate::types::{Dimensional, Orientation, Size, validation};

fn validate_sheet_dims(width: f64, height: f64) -> Result<(), ValidationError> {
    validation::check_dimension(width)
        .and_then(|_| validation::check_dimension(height))
        .map_err(|reason| ValidationError::InvalidSheet {
            width,
            height,
            reason,
        })
}

fn validate_piece_dims(id: PieceId, width: f64, height: f64) -> Result<(), ValidationError> {
    validation::check_dimension(width)
        .and_then(|_| validation::check_dimension(height))
        .map_err(|reason| ValidationError::InvalidPiece {
            id,
            width,
            height,
            reason,
        })
}

/// One physical stock sheet. Every sheet of a run has the declared size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
}

impl Sheet {
    /// Creates a sheet after validating its dimensions.
    ///
    /// # Examples
    /// ```
    /// use cut_it_now::model::Sheet;
    ///
    /// assert!(Sheet::new(2000.0, 1000.0).is_ok());
    /// assert!(Sheet::new(0.0, 1000.0).is_err());
    /// ```
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        validate_sheet_dims(width, height)?;
        Ok(Self { width, height })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_sheet_dims(self.width, self.height)
    }

    /// The whole sheet as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::at_origin(self.dimensions())
    }

    /// Length below which two edges on this sheet count as coincident.
    pub fn length_tolerance(&self) -> f64 {
        RELATIVE_TOLERANCE * self.width.max(self.height)
    }
}

impl Dimensional for Sheet {
    fn dimensions(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Furniture part category carried through from the design tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Door,
    Leg,
    Shelf,
    Panel,
    Accessory,
}

/// A rectangular demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub width: f64,
    pub height: f64,
    /// Whether this piece may be turned by 90 degrees.
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    #[serde(default)]
    pub kind: Option<PieceKind>,
}

fn default_allow_rotation() -> bool {
    true
}

impl Piece {
    /// Creates a rotatable piece with validated dimensions.
    ///
    /// # Examples
    /// ```
    /// use cut_it_now::model::Piece;
    ///
    /// let shelf = Piece::new(1, 800.0, 300.0).unwrap();
    /// assert!(shelf.allow_rotation);
    ///
    /// assert!(Piece::new(2, -10.0, 300.0).is_err());
    /// ```
    pub fn new(id: PieceId, width: f64, height: f64) -> Result<Self, ValidationError> {
        validate_piece_dims(id, width, height)?;
        Ok(Self {
            id,
            width,
            height,
            allow_rotation: true,
            kind: None,
        })
    }

    /// Pins the piece to its declared orientation, e.g. for grained panels.
    pub fn fixed_orientation(mut self) -> Self {
        self.allow_rotation = false;
        self
    }

    pub fn with_kind(mut self, kind: PieceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_piece_dims(self.id, self.width, self.height)
    }

    /// Checks whether the piece fits an empty sheet in some allowed orientation.
    pub fn fits_empty_sheet(&self, sheet: &Sheet, allow_rotation: bool) -> bool {
        let outer = sheet.dimensions();
        Orientation::candidates(self.dimensions(), allow_rotation)
            .iter()
            .any(|&orientation| self.fits_in(&outer, orientation))
    }
}

impl Dimensional for Piece {
    fn dimensions(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A piece positioned on a sheet. Never mutated once emitted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub piece_id: PieceId,
    pub sheet_index: usize,
    pub x: f64,
    pub y: f64,
    /// Footprint width after rotation.
    pub width: f64,
    /// Footprint height after rotation.
    pub height: f64,
    pub rotated: bool,
    pub kind: Option<PieceKind>,
}

impl Placement {
    pub fn new(piece: &Piece, sheet_index: usize, footprint: Rect, orientation: Orientation) -> Self {
        Self {
            piece_id: piece.id,
            sheet_index,
            x: footprint.x,
            y: footprint.y,
            width: footprint.width,
            height: footprint.height,
            rotated: orientation.is_rotated(),
            kind: piece.kind,
        }
    }

    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Dimensional for Placement {
    fn dimensions(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Per-sheet statistics of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetSummary {
    pub index: usize,
    pub placed_count: usize,
    pub used_area: f64,
    pub free_area: f64,
    pub free_region_count: usize,
    /// Used area / sheet area, 0.0 to 1.0.
    pub utilization: f64,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub sheet: Sheet,
    /// Placements in emission order: sheet by sheet, visiting order within a sheet.
    pub placements: Vec<Placement>,
    pub sheets: Vec<SheetSummary>,
}

impl OptimizationResult {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn placed_area(&self) -> f64 {
        self.placements.iter().map(|p| area(&p.footprint())).sum()
    }

    pub fn total_sheet_area(&self) -> f64 {
        self.sheet.area() * self.sheet_count() as f64
    }

    /// Unused area as a fraction of all allocated sheet area.
    ///
    /// Clamped at zero: an exactly tiled sheet may sum a few ulps over.
    pub fn waste(&self) -> f64 {
        let total = self.total_sheet_area();
        if total <= 0.0 {
            return 0.0;
        }
        ((total - self.placed_area()) / total).max(0.0)
    }

    /// Placements cut from one sheet.
    pub fn placements_on(&self, sheet_index: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.sheet_index == sheet_index)
    }
}
