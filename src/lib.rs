//! Guillotine sheet cutting optimizer.
//!
//! Lays rectangular pieces out on identical stock sheets so that every
//! piece can be separated by edge-to-edge cuts. Pieces are visited largest
//! first and each goes to the free region it fills best; sheets are opened
//! on demand up to a configurable limit.
//!
//! ```
//! use cut_it_now::model::{Piece, Sheet};
//! use cut_it_now::optimizer::optimize;
//!
//! let sheet = Sheet::new(200.0, 200.0).unwrap();
//! let pieces = vec![
//!     Piece::new(1, 150.0, 150.0).unwrap(),
//!     Piece::new(2, 150.0, 150.0).unwrap(),
//! ];
//! let result = optimize(sheet, pieces).unwrap();
//! assert_eq!(result.sheet_count(), 2);
//! ```

pub mod allocator;
pub mod api;
pub mod config;
pub mod error;
pub mod free_space;
pub mod geometry;
pub mod heuristic;
pub mod model;
pub mod optimizer;
pub mod runner;
pub mod types;

pub use error::{InvariantViolation, OptimizeError, RunError, ValidationError};
pub use model::{OptimizationResult, Piece, PieceKind, Placement, Sheet};
pub use optimizer::{CancelToken, CutConfig, CutEvent, optimize, optimize_with_config, optimize_with_progress};
