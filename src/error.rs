//! Error types for sheet cutting optimization.

use thiserror::Error;

/// Piece identifier as supplied by the caller.
pub type PieceId = usize;

/// Malformed request. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid sheet dimensions {width}x{height}: {reason}")]
    InvalidSheet {
        width: f64,
        height: f64,
        reason: &'static str,
    },

    #[error("Invalid dimensions {width}x{height} for piece {id}: {reason}")]
    InvalidPiece {
        id: PieceId,
        width: f64,
        height: f64,
        reason: &'static str,
    },

    #[error("Piece id {id} is used more than once")]
    DuplicateId { id: PieceId },

    #[error("Piece(s) {} do not fit an empty {sheet_width}x{sheet_height} sheet in any allowed orientation", join_ids(.ids))]
    UnsatisfiablePiece {
        ids: Vec<PieceId>,
        sheet_width: f64,
        sheet_height: f64,
    },

    #[error("Request contains no pieces")]
    NoPieces,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidSheet { .. } => "invalid_sheet",
            ValidationError::InvalidPiece { .. } => "invalid_piece",
            ValidationError::DuplicateId { .. } => "duplicate_id",
            ValidationError::UnsatisfiablePiece { .. } => "unsatisfiable_piece",
            ValidationError::NoPieces => "no_pieces",
            ValidationError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }

    /// Ids of the pieces that caused the rejection.
    pub fn piece_ids(&self) -> Vec<PieceId> {
        match self {
            ValidationError::InvalidPiece { id, .. } | ValidationError::DuplicateId { id } => {
                vec![*id]
            }
            ValidationError::UnsatisfiablePiece { ids, .. } => ids.clone(),
            _ => Vec::new(),
        }
    }
}

/// Outcome of a run that did not produce a layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Sheet limit of {max_sheets} reached with {} piece(s) unplaced: {}", .unplaced.len(), join_ids(.unplaced))]
    CapacityExceeded {
        max_sheets: usize,
        unplaced: Vec<PieceId>,
    },

    #[error("Optimization cancelled")]
    Cancelled,
}

impl OptimizeError {
    pub fn code(&self) -> &'static str {
        match self {
            OptimizeError::Validation(err) => err.code(),
            OptimizeError::CapacityExceeded { .. } => "capacity_exceeded",
            OptimizeError::Cancelled => "cancelled",
        }
    }

    /// Whether rerunning can succeed. Capacity errors need a higher
    /// `max_sheets`; cancelled runs can simply be repeated.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, OptimizeError::Validation(_))
    }

    pub fn piece_ids(&self) -> Vec<PieceId> {
        match self {
            OptimizeError::Validation(err) => err.piece_ids(),
            OptimizeError::CapacityExceeded { unplaced, .. } => unplaced.clone(),
            OptimizeError::Cancelled => Vec::new(),
        }
    }
}

/// Broken layout produced by the algorithm itself.
///
/// This is a programming defect: the optimizer panics with it instead of
/// returning a corrupted result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("Pieces {first} and {second} overlap on sheet {sheet_index}")]
    Overlap {
        sheet_index: usize,
        first: PieceId,
        second: PieceId,
    },

    #[error("Piece {id} lies outside sheet {sheet_index}")]
    OutOfBounds { sheet_index: usize, id: PieceId },

    #[error("Free region on sheet {sheet_index} is no longer tracked")]
    StaleRegion { sheet_index: usize },

    #[error("Sheet {sheet_index} was never opened")]
    UnknownSheet { sheet_index: usize },

    #[error("Free regions on sheet {sheet_index} overlap")]
    OverlappingFreeSpace { sheet_index: usize },

    #[error("Sheet {sheet_index} was closed without placements")]
    EmptySheet { sheet_index: usize },
}

/// Errors of the async runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error("Deadline of {limit_ms}ms exceeded")]
    DeadlineExceeded { limit_ms: u128 },

    #[error("Optimizer worker failed: {0}")]
    Worker(String),
}

impl RunError {
    pub fn code(&self) -> &'static str {
        match self {
            RunError::Optimize(err) => err.code(),
            RunError::DeadlineExceeded { .. } => "deadline_exceeded",
            RunError::Worker(_) => "worker_failed",
        }
    }

    /// Deadline expiry is transient: the same input can be rerun.
    pub fn is_retryable(&self) -> bool {
        match self {
            RunError::Optimize(err) => err.is_retryable(),
            RunError::DeadlineExceeded { .. } => true,
            RunError::Worker(_) => false,
        }
    }
}

fn join_ids(ids: &[PieceId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;
