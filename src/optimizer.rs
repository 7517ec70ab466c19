//! Optimization driver for guillotine sheet cutting.
//!
//! A run moves through fixed phases:
//! - Validating: the request is checked before any sheet is opened
//! - Packing: sheets are opened one at a time and filled largest piece first
//! - Done: every piece has exactly one placement
//! - Failed: the sheet quota ran out or the run was cancelled
//!
//! Runs are synchronous and deterministic. They share no state, so separate
//! runs may execute on separate threads without coordination.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::allocator::SheetAllocator;
use crate::error::{InvariantViolation, OptimizeError, PieceId, Result, ValidationError};
use crate::free_space::FreeSpaceTracker;
use crate::geometry::{contains, overlaps};
use crate::heuristic::{PieceQueue, fill_sheet};
use crate::model::{OptimizationResult, Piece, Sheet};

/// Configuration of the cutting algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CutConfig {
    /// Allows 90 degree rotation for pieces that do not opt out themselves.
    pub allow_rotation: bool,
    /// Upper bound on the number of sheets a run may open.
    pub max_sheets: usize,
}

impl CutConfig {
    pub const DEFAULT_ALLOW_ROTATION: bool = true;
    pub const DEFAULT_MAX_SHEETS: usize = 64;

    /// Creates a builder for custom configuration.
    pub fn builder() -> CutConfigBuilder {
        CutConfigBuilder::default()
    }
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            allow_rotation: Self::DEFAULT_ALLOW_ROTATION,
            max_sheets: Self::DEFAULT_MAX_SHEETS,
        }
    }
}

/// Builder for [`CutConfig`].
#[derive(Clone, Debug, Default)]
pub struct CutConfigBuilder {
    config: CutConfig,
}

impl CutConfigBuilder {
    pub fn allow_rotation(mut self, allow: bool) -> Self {
        self.config.allow_rotation = allow;
        self
    }

    pub fn max_sheets(mut self, max_sheets: usize) -> Self {
        self.config.max_sheets = max_sheets;
        self
    }

    pub fn build(self) -> CutConfig {
        self.config
    }
}

/// Cooperative cancellation signal shared between a caller and a run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress events of a run, suitable for live visualization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum CutEvent {
    /// A new sheet was opened.
    SheetOpened {
        sheet_index: usize,
        width: f64,
        height: f64,
    },
    /// A piece was placed.
    PiecePlaced {
        sheet_index: usize,
        id: PieceId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotated: bool,
    },
    /// A piece found no room and waits for the next sheet.
    PieceDeferred { sheet_index: usize, id: PieceId },
    /// No further piece fits on the sheet.
    SheetClosed {
        sheet_index: usize,
        placed: usize,
        utilization: f64,
    },
    /// All pieces were placed.
    Finished {
        sheet_count: usize,
        placed: usize,
        waste: f64,
    },
    /// The run ended without a layout.
    Failed { code: String, message: String },
}

/// Phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Validating,
    Packing { sheet_index: usize },
    Done,
    Failed,
}

impl RunPhase {
    fn advance(&mut self, next: RunPhase) {
        let from = *self;
        debug!(?from, to = ?next, "run phase changed");
        *self = next;
    }
}

/// Aborts on a broken layout. Returning it would hand corrupted cuts to a machine.
#[cold]
pub(crate) fn fail_fast(violation: InvariantViolation) -> ! {
    panic!("cutting layout invariant violated: {violation}")
}

/// Checks a request before packing starts.
///
/// Reports the first structural problem found, or every piece that cannot
/// fit an empty sheet in any allowed orientation.
pub fn validate(sheet: &Sheet, pieces: &[Piece], config: &CutConfig) -> std::result::Result<(), ValidationError> {
    if config.max_sheets == 0 {
        return Err(ValidationError::InvalidConfiguration(
            "max_sheets must be at least 1".to_string(),
        ));
    }
    sheet.validate()?;
    if pieces.is_empty() {
        return Err(ValidationError::NoPieces);
    }

    let mut seen = HashSet::with_capacity(pieces.len());
    for piece in pieces {
        piece.validate()?;
        if !seen.insert(piece.id) {
            return Err(ValidationError::DuplicateId { id: piece.id });
        }
    }

    let unsatisfiable: Vec<PieceId> = pieces
        .iter()
        .filter(|p| !p.fits_empty_sheet(sheet, config.allow_rotation && p.allow_rotation))
        .map(|p| p.id)
        .collect();
    if !unsatisfiable.is_empty() {
        return Err(ValidationError::UnsatisfiablePiece {
            ids: unsatisfiable,
            sheet_width: sheet.width,
            sheet_height: sheet.height,
        });
    }

    Ok(())
}

/// Re-checks a finished layout: every placement inside the sheet and no two
/// placements on the same sheet overlapping.
///
/// Intrusions up to the sheet's length tolerance are accepted; they stem from
/// rounding when decimal sizes are summed.
pub fn verify_layout(result: &OptimizationResult) -> std::result::Result<(), InvariantViolation> {
    let bounds = result.sheet.bounds();
    let tolerance = result.sheet.length_tolerance();
    for sheet_index in 0..result.sheet_count() {
        let placed: Vec<_> = result.placements_on(sheet_index).collect();
        for (i, a) in placed.iter().enumerate() {
            let footprint = a.footprint();
            if !contains(&bounds, &footprint, tolerance) {
                return Err(InvariantViolation::OutOfBounds {
                    sheet_index,
                    id: a.piece_id,
                });
            }
            if let Some(b) = placed[i + 1..]
                .iter()
                .find(|b| overlaps(&footprint, &b.footprint(), tolerance))
            {
                return Err(InvariantViolation::Overlap {
                    sheet_index,
                    first: a.piece_id,
                    second: b.piece_id,
                });
            }
        }
    }
    Ok(())
}

/// Cuts `pieces` from as few sheets as the heuristic manages.
///
/// Uses the default configuration. See [`optimize_with_progress`].
///
/// # Example
/// ```
/// use cut_it_now::model::{Piece, Sheet};
/// use cut_it_now::optimizer::optimize;
///
/// let sheet = Sheet::new(1000.0, 500.0).unwrap();
/// let result = optimize(sheet, vec![Piece::new(1, 100.0, 50.0).unwrap()]).unwrap();
/// assert_eq!(result.sheet_count(), 1);
/// assert_eq!((result.placements[0].x, result.placements[0].y), (0.0, 0.0));
/// ```
pub fn optimize(sheet: Sheet, pieces: Vec<Piece>) -> Result<OptimizationResult> {
    optimize_with_config(sheet, pieces, CutConfig::default())
}

/// Like [`optimize`], with custom configuration.
pub fn optimize_with_config(
    sheet: Sheet,
    pieces: Vec<Piece>,
    config: CutConfig,
) -> Result<OptimizationResult> {
    optimize_with_progress(sheet, pieces, config, &CancelToken::new(), |_| {})
}

/// Runs the optimizer with cancellation and a live progress callback.
///
/// The cancel token is checked before each sheet is opened and before each
/// piece is placed. A cancelled run yields [`OptimizeError::Cancelled`] and
/// no partial layout.
pub fn optimize_with_progress(
    sheet: Sheet,
    pieces: Vec<Piece>,
    config: CutConfig,
    cancel: &CancelToken,
    mut on_event: impl FnMut(&CutEvent),
) -> Result<OptimizationResult> {
    let started = Instant::now();
    let mut phase = RunPhase::Validating;
    info!(
        pieces = pieces.len(),
        sheet_width = sheet.width,
        sheet_height = sheet.height,
        max_sheets = config.max_sheets,
        "optimization started"
    );

    let outcome = validate(&sheet, &pieces, &config)
        .map_err(OptimizeError::from)
        .and_then(|()| pack(sheet, &pieces, &config, cancel, &mut phase, &mut on_event));

    match &outcome {
        Ok(result) => {
            phase.advance(RunPhase::Done);
            let waste = result.waste();
            on_event(&CutEvent::Finished {
                sheet_count: result.sheet_count(),
                placed: result.placements.len(),
                waste,
            });
            info!(
                sheets = result.sheet_count(),
                placed = result.placements.len(),
                waste,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "optimization finished"
            );
        }
        Err(err) => {
            phase.advance(RunPhase::Failed);
            on_event(&CutEvent::Failed {
                code: err.code().to_string(),
                message: err.to_string(),
            });
            warn!(
                code = err.code(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "optimization failed: {err}"
            );
        }
    }
    outcome
}

fn pack(
    sheet: Sheet,
    pieces: &[Piece],
    config: &CutConfig,
    cancel: &CancelToken,
    phase: &mut RunPhase,
    on_event: &mut impl FnMut(&CutEvent),
) -> Result<OptimizationResult> {
    let mut tracker = FreeSpaceTracker::new();
    let mut allocator = SheetAllocator::new(sheet, config.max_sheets);
    let mut queue = PieceQueue::new(pieces.len());

    while !queue.is_empty() {
        if cancel.is_cancelled() {
            return Err(OptimizeError::Cancelled);
        }
        let Some(sheet_index) = allocator.open_sheet(&mut tracker) else {
            return Err(OptimizeError::CapacityExceeded {
                max_sheets: config.max_sheets,
                unplaced: queue.remaining_ids(pieces),
            });
        };
        phase.advance(RunPhase::Packing { sheet_index });
        on_event(&CutEvent::SheetOpened {
            sheet_index,
            width: sheet.width,
            height: sheet.height,
        });

        let placements = fill_sheet(
            &mut tracker,
            sheet_index,
            pieces,
            &mut queue,
            config.allow_rotation,
            cancel,
            on_event,
        )?;
        // Every validated piece fits an empty sheet, so the first one always lands
        if placements.is_empty() {
            fail_fast(InvariantViolation::EmptySheet { sheet_index });
        }

        let summary = allocator.close_sheet(sheet_index, placements, &tracker);
        on_event(&CutEvent::SheetClosed {
            sheet_index,
            placed: summary.placed_count,
            utilization: summary.utilization,
        });
    }

    let result = allocator.finish();
    if let Err(violation) = verify_layout(&result) {
        fail_fast(violation);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PieceKind, Placement};
    use crate::types::Dimensional;

    fn piece(id: PieceId, width: f64, height: f64) -> Piece {
        Piece::new(id, width, height).unwrap()
    }

    fn sheet(width: f64, height: f64) -> Sheet {
        Sheet::new(width, height).unwrap()
    }

    /// Deterministic pseudo-random piece list (linear congruential generator).
    fn generated_pieces(count: usize, seed: u64) -> Vec<Piece> {
        generated_pieces_in_steps(count, seed, 1)
    }

    /// Like `generated_pieces`, with sizes drawn in tenths of a unit.
    fn generated_decimal_pieces(count: usize, seed: u64) -> Vec<Piece> {
        generated_pieces_in_steps(count, seed, 10)
    }

    fn generated_pieces_in_steps(count: usize, seed: u64, steps: u64) -> Vec<Piece> {
        let mut state = seed;
        let mut next = move |range: u64| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) % range
        };
        let scale = steps as f64;
        (0..count)
            .map(|id| {
                let width = (20 * steps + next(580 * steps)) as f64 / scale;
                let height = (20 * steps + next(380 * steps)) as f64 / scale;
                let mut p = piece(id, width, height);
                if next(5) == 0 {
                    p = p.fixed_orientation();
                }
                p
            })
            .collect()
    }

    fn assert_layout_valid(result: &OptimizationResult, pieces: &[Piece], config: &CutConfig) {
        assert!(verify_layout(result).is_ok(), "layout overlaps or leaves the sheet");

        let mut ids: Vec<_> = result.placements.iter().map(|p| p.piece_id).collect();
        ids.sort_unstable();
        let mut expected: Vec<_> = pieces.iter().map(|p| p.id).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected, "every piece must be placed exactly once");

        for placement in &result.placements {
            let original = pieces
                .iter()
                .find(|p| p.id == placement.piece_id)
                .expect("placement of unknown piece");
            assert_orientation_legal(placement, original, config);
            assert!(placement.sheet_index < result.sheet_count());
        }
    }

    fn assert_orientation_legal(placement: &Placement, piece: &Piece, config: &CutConfig) {
        let footprint = placement.dimensions();
        if placement.rotated {
            assert!(config.allow_rotation && piece.allow_rotation);
            assert_eq!(footprint, piece.dimensions().rotated());
        } else {
            assert_eq!(footprint, piece.dimensions());
        }
    }

    #[test]
    fn single_piece_lands_in_corner() {
        let result = optimize(sheet(1000.0, 500.0), vec![piece(1, 100.0, 50.0)]).unwrap();

        assert_eq!(result.sheet_count(), 1);
        assert_eq!(
            result.placements,
            vec![Placement {
                piece_id: 1,
                sheet_index: 0,
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 50.0,
                rotated: false,
                kind: None,
            }]
        );
    }

    #[test]
    fn oversized_pair_needs_two_sheets() {
        let pieces = vec![piece(1, 150.0, 150.0), piece(2, 150.0, 150.0)];
        let result = optimize(sheet(200.0, 200.0), pieces.clone()).unwrap();

        assert_eq!(result.sheet_count(), 2);
        for (index, placement) in result.placements.iter().enumerate() {
            assert_eq!(placement.sheet_index, index);
            assert_eq!((placement.x, placement.y), (0.0, 0.0));
        }
        assert_layout_valid(&result, &pieces, &CutConfig::default());
    }

    #[test]
    fn tall_piece_is_rotated_onto_flat_sheet() {
        let result = optimize(sheet(300.0, 100.0), vec![piece(1, 50.0, 120.0)]).unwrap();
        let placement = &result.placements[0];

        assert!(placement.rotated);
        assert_eq!((placement.width, placement.height), (120.0, 50.0));
    }

    #[test]
    fn locked_tall_piece_is_unsatisfiable() {
        let err = optimize(
            sheet(300.0, 100.0),
            vec![piece(1, 50.0, 120.0).fixed_orientation()],
        )
        .unwrap_err();

        assert_eq!(err.piece_ids(), vec![1]);
        assert!(matches!(
            err,
            OptimizeError::Validation(ValidationError::UnsatisfiablePiece { .. })
        ));
    }

    #[test]
    fn global_rotation_switch_applies_to_all_pieces() {
        let config = CutConfig::builder().allow_rotation(false).build();
        let err = optimize_with_config(sheet(300.0, 100.0), vec![piece(1, 50.0, 120.0)], config)
            .unwrap_err();

        assert_eq!(err.code(), "unsatisfiable_piece");
    }

    #[test]
    fn quota_of_one_sheet_reports_capacity_exceeded() {
        let config = CutConfig::builder().max_sheets(1).build();
        let err = optimize_with_config(
            sheet(200.0, 200.0),
            vec![piece(1, 150.0, 150.0), piece(2, 150.0, 150.0)],
            config,
        )
        .unwrap_err();

        assert_eq!(
            err,
            OptimizeError::CapacityExceeded {
                max_sheets: 1,
                unplaced: vec![2],
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn piece_larger_than_sheet_in_both_orientations_is_named() {
        let mut events = Vec::new();
        let err = optimize_with_progress(
            sheet(100.0, 100.0),
            vec![piece(1, 50.0, 50.0), piece(2, 150.0, 120.0), piece(3, 101.0, 10.0)],
            CutConfig::default(),
            &CancelToken::new(),
            |evt| events.push(evt.clone()),
        )
        .unwrap_err();

        assert_eq!(err.piece_ids(), vec![2, 3]);
        assert!(!events
            .iter()
            .any(|e| matches!(e, CutEvent::PiecePlaced { .. })));
        assert!(matches!(events.last(), Some(CutEvent::Failed { .. })));
    }

    #[test]
    fn structural_validation_errors() {
        let cases = vec![
            (sheet(10.0, 10.0), vec![], ValidationError::NoPieces),
            (
                sheet(10.0, 10.0),
                vec![piece(1, 1.0, 1.0), piece(1, 2.0, 2.0)],
                ValidationError::DuplicateId { id: 1 },
            ),
        ];
        for (sheet, pieces, expected) in cases {
            assert_eq!(
                optimize(sheet, pieces).unwrap_err(),
                OptimizeError::Validation(expected)
            );
        }

        let bad_sheet = Sheet {
            width: -5.0,
            height: 10.0,
        };
        assert_eq!(
            optimize(bad_sheet, vec![piece(1, 1.0, 1.0)]).unwrap_err().code(),
            "invalid_sheet"
        );

        let bad_piece = Piece {
            id: 8,
            width: 0.0,
            height: 3.0,
            allow_rotation: true,
            kind: None,
        };
        assert_eq!(
            optimize(sheet(10.0, 10.0), vec![bad_piece]).unwrap_err().piece_ids(),
            vec![8]
        );

        let zero_quota = CutConfig::builder().max_sheets(0).build();
        assert_eq!(
            optimize_with_config(sheet(10.0, 10.0), vec![piece(1, 1.0, 1.0)], zero_quota)
                .unwrap_err()
                .code(),
            "invalid_configuration"
        );
    }

    #[test]
    fn four_quarters_fill_one_sheet() {
        let pieces: Vec<_> = (1..=4).map(|id| piece(id, 50.0, 50.0)).collect();
        let result = optimize(sheet(100.0, 100.0), pieces.clone()).unwrap();

        assert_eq!(result.sheet_count(), 1);
        assert_eq!(result.waste(), 0.0);
        assert_eq!(result.sheets[0].free_region_count, 0);
        assert_layout_valid(&result, &pieces, &CutConfig::default());
    }

    #[test]
    fn kind_is_carried_to_placement() {
        let door = piece(1, 600.0, 1800.0).with_kind(PieceKind::Door);
        let result = optimize(sheet(2800.0, 2070.0), vec![door]).unwrap();

        assert_eq!(result.placements[0].kind, Some(PieceKind::Door));
    }

    #[test]
    fn generated_workload_respects_all_layout_properties() {
        let config = CutConfig::default();
        for seed in [1, 7, 42, 2024] {
            let pieces = generated_pieces(120, seed);
            let result =
                optimize_with_config(sheet(2440.0, 1220.0), pieces.clone(), config).unwrap();

            assert_layout_valid(&result, &pieces, &config);
            let summed: usize = result.sheets.iter().map(|s| s.placed_count).sum();
            assert_eq!(summed, pieces.len());
            assert!(result.waste() >= 0.0 && result.waste() < 1.0);
        }
    }

    #[test]
    fn decimal_workload_respects_all_layout_properties() {
        let config = CutConfig::default();
        for seed in 0..40 {
            let count = 40 + (seed as usize % 5) * 20;
            let pieces = generated_decimal_pieces(count, seed);
            let result =
                optimize_with_config(sheet(2440.0, 1220.0), pieces.clone(), config).unwrap();

            assert_layout_valid(&result, &pieces, &config);
            assert!(result.waste() >= 0.0 && result.waste() < 1.0);
        }
    }

    #[test]
    fn fractional_strips_tile_a_single_sheet() {
        let (width, height) = (2440.0, 1220.0);
        for columns in 2..30 {
            let strip_width = width / columns as f64;
            let strip_height = height / 3.0;
            let pieces: Vec<_> = (0..columns * 3)
                .map(|id| piece(id, strip_width, strip_height).fixed_orientation())
                .collect();
            let config = CutConfig::default();
            let result =
                optimize_with_config(sheet(width, height), pieces.clone(), config).unwrap();

            assert_layout_valid(&result, &pieces, &config);
            assert_eq!(result.sheet_count(), 1, "{columns} columns spilled onto a new sheet");
        }
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let pieces = generated_pieces(80, 99);
        let first = optimize(sheet(2800.0, 2070.0), pieces.clone()).unwrap();
        let second = optimize(sheet(2800.0, 2070.0), pieces).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn input_order_does_not_change_the_layout() {
        let pieces = generated_pieces(40, 5);
        let mut reversed = pieces.clone();
        reversed.reverse();

        let a = optimize(sheet(2440.0, 1220.0), pieces).unwrap();
        let b = optimize(sheet(2440.0, 1220.0), reversed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cancelled_run_returns_no_layout() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = optimize_with_progress(
            sheet(100.0, 100.0),
            vec![piece(1, 10.0, 10.0)],
            CutConfig::default(),
            &cancel,
            |_| {},
        );

        assert_eq!(outcome, Err(OptimizeError::Cancelled));
    }

    #[test]
    fn cancellation_mid_run_stops_placing() {
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let mut placed = 0;
        let outcome = optimize_with_progress(
            sheet(100.0, 100.0),
            (0..20).map(|id| piece(id, 10.0, 10.0)).collect(),
            CutConfig::default(),
            &cancel,
            |evt| {
                if matches!(evt, CutEvent::PiecePlaced { .. }) {
                    placed += 1;
                    if placed == 3 {
                        trigger.cancel();
                    }
                }
            },
        );

        assert_eq!(outcome, Err(OptimizeError::Cancelled));
        assert_eq!(placed, 3);
    }

    #[test]
    fn progress_events_follow_sheet_lifecycle() {
        let mut events = Vec::new();
        optimize_with_progress(
            sheet(200.0, 200.0),
            vec![piece(1, 150.0, 150.0), piece(2, 150.0, 150.0)],
            CutConfig::default(),
            &CancelToken::new(),
            |evt| events.push(evt.clone()),
        )
        .unwrap();

        let kinds: Vec<_> = events
            .iter()
            .map(|e| match e {
                CutEvent::SheetOpened { .. } => "open",
                CutEvent::PiecePlaced { .. } => "place",
                CutEvent::PieceDeferred { .. } => "defer",
                CutEvent::SheetClosed { .. } => "close",
                CutEvent::Finished { .. } => "finish",
                CutEvent::Failed { .. } => "fail",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["open", "place", "defer", "close", "open", "place", "close", "finish"]
        );
    }

    #[test]
    fn verify_layout_detects_overlap_and_bounds() {
        let base = optimize(sheet(100.0, 100.0), vec![piece(1, 60.0, 60.0)]).unwrap();

        let mut overlapping = base.clone();
        let mut second = overlapping.placements[0].clone();
        second.piece_id = 2;
        second.x = 30.0;
        second.width = 40.0;
        overlapping.placements.push(second);
        assert_eq!(
            verify_layout(&overlapping),
            Err(InvariantViolation::Overlap {
                sheet_index: 0,
                first: 1,
                second: 2
            })
        );

        let mut outside = base;
        outside.placements[0].x = 50.0;
        assert_eq!(
            verify_layout(&outside),
            Err(InvariantViolation::OutOfBounds {
                sheet_index: 0,
                id: 1
            })
        );
    }

    #[test]
    fn parallel_runs_share_nothing() {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                std::thread::spawn(move || {
                    optimize(sheet(2440.0, 1220.0), generated_pieces(60, seed)).unwrap()
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (seed, result) in results.iter().enumerate() {
            let again = optimize(sheet(2440.0, 1220.0), generated_pieces(60, seed as u64)).unwrap();
            assert_eq!(result, &again);
        }
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = CutConfig::builder().allow_rotation(false).max_sheets(3).build();
        assert!(!config.allow_rotation);
        assert_eq!(config.max_sheets, 3);
        assert_eq!(CutConfig::default().max_sheets, CutConfig::DEFAULT_MAX_SHEETS);
    }
}
