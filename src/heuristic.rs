//! Piece ordering and the per-sheet placement pass.
//!
//! Pieces are visited largest first. A piece that finds no free region on the
//! current sheet is deferred to the next sheet through [`PieceQueue`]; the
//! queue's two buffers are swapped between sheet attempts so no allocation
//! happens per sheet.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::{OptimizeError, PieceId};
use crate::free_space::FreeSpaceTracker;
use crate::model::{Piece, Placement};
use crate::optimizer::{CancelToken, CutEvent, fail_fast};
use crate::types::Dimensional;

/// Visiting order: longest side descending, then area descending, then id.
pub fn visit_order(a: &Piece, b: &Piece) -> Ordering {
    let (da, db) = (a.dimensions(), b.dimensions());
    db.longest_side()
        .total_cmp(&da.longest_side())
        .then_with(|| db.area().total_cmp(&da.area()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Indices of pieces not yet placed, carried from one sheet attempt to the next.
#[derive(Clone, Debug, Default)]
pub struct PieceQueue {
    pending: Vec<usize>,
    deferred: Vec<usize>,
}

impl PieceQueue {
    /// Queue holding every piece of the arena.
    pub fn new(piece_count: usize) -> Self {
        Self {
            pending: (0..piece_count).collect(),
            deferred: Vec::with_capacity(piece_count),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Ids of the pieces still waiting, in visiting order.
    pub fn remaining_ids(&self, pieces: &[Piece]) -> Vec<PieceId> {
        let mut ids: Vec<&Piece> = self.pending.iter().map(|&idx| &pieces[idx]).collect();
        ids.sort_by(|a, b| visit_order(a, b));
        ids.into_iter().map(|p| p.id).collect()
    }
}

/// Places as many queued pieces as possible on one opened sheet.
///
/// Pieces are sorted into visiting order at the start of the attempt. Each one
/// goes to its best fit on the sheet; pieces without a fit stay queued for the
/// next sheet. The cancel token is checked before every piece.
pub fn fill_sheet(
    tracker: &mut FreeSpaceTracker,
    sheet_index: usize,
    pieces: &[Piece],
    queue: &mut PieceQueue,
    allow_rotation: bool,
    cancel: &CancelToken,
    on_event: &mut impl FnMut(&CutEvent),
) -> Result<Vec<Placement>, OptimizeError> {
    let mut pending = std::mem::take(&mut queue.pending);
    pending.sort_by(|&a, &b| visit_order(&pieces[a], &pieces[b]));

    let mut placements = Vec::new();
    let mut outcome = Ok(());

    for (position, &idx) in pending.iter().enumerate() {
        if cancel.is_cancelled() {
            // Keep the queue consistent even though the run is abandoned
            queue.deferred.extend_from_slice(&pending[position..]);
            outcome = Err(OptimizeError::Cancelled);
            break;
        }

        let piece = &pieces[idx];
        let rotatable = allow_rotation && piece.allow_rotation;
        let Some(fit) = tracker.best_fit(sheet_index, piece.dimensions(), rotatable) else {
            on_event(&CutEvent::PieceDeferred {
                sheet_index,
                id: piece.id,
            });
            queue.deferred.push(idx);
            continue;
        };

        let footprint = match tracker.place(sheet_index, &fit) {
            Ok(rect) => rect,
            Err(violation) => fail_fast(violation),
        };
        let placement = Placement::new(piece, sheet_index, footprint, fit.orientation);
        trace!(
            sheet = sheet_index,
            id = piece.id,
            x = placement.x,
            y = placement.y,
            rotated = placement.rotated,
            "piece placed"
        );
        on_event(&CutEvent::PiecePlaced {
            sheet_index,
            id: piece.id,
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            rotated: placement.rotated,
        });
        placements.push(placement);
    }

    // Swap buffers: deferred pieces become the next attempt's input
    pending.clear();
    queue.pending = std::mem::replace(&mut queue.deferred, pending);

    outcome.map(|_| placements)
}
