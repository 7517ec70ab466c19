//! Sheet allocation under the `max_sheets` quota.

use tracing::debug;

use crate::free_space::FreeSpaceTracker;
use crate::model::{OptimizationResult, Placement, Sheet, SheetSummary};
use crate::types::Dimensional;

/// Opens sheets on demand and collects the finished ones.
#[derive(Clone, Debug)]
pub struct SheetAllocator {
    sheet: Sheet,
    max_sheets: usize,
    next_index: usize,
    placements: Vec<Placement>,
    summaries: Vec<SheetSummary>,
}

impl SheetAllocator {
    pub fn new(sheet: Sheet, max_sheets: usize) -> Self {
        Self {
            sheet,
            max_sheets,
            next_index: 0,
            placements: Vec::new(),
            summaries: Vec::new(),
        }
    }

    /// Number of sheets opened so far.
    pub fn opened(&self) -> usize {
        self.next_index
    }

    pub fn has_capacity(&self) -> bool {
        self.next_index < self.max_sheets
    }

    /// Opens the next sheet and seeds its free space.
    ///
    /// Returns `None` once the quota is used up.
    pub fn open_sheet(&mut self, tracker: &mut FreeSpaceTracker) -> Option<usize> {
        if !self.has_capacity() {
            return None;
        }
        let index = self.next_index;
        tracker.open_sheet(index, &self.sheet);
        self.next_index += 1;
        debug!(sheet = index, max_sheets = self.max_sheets, "sheet opened");
        Some(index)
    }

    /// Records the placements of a finished sheet.
    pub fn close_sheet(
        &mut self,
        index: usize,
        placements: Vec<Placement>,
        tracker: &FreeSpaceTracker,
    ) -> SheetSummary {
        let sheet_area = self.sheet.area();
        let used_area: f64 = placements.iter().map(|p| p.area()).sum();
        let summary = SheetSummary {
            index,
            placed_count: placements.len(),
            used_area,
            free_area: tracker.free_area(index),
            free_region_count: tracker.regions(index).len(),
            utilization: used_area / sheet_area,
        };
        debug!(
            sheet = index,
            placed = summary.placed_count,
            utilization = summary.utilization,
            "sheet closed"
        );

        self.placements.extend(placements);
        self.summaries.push(summary.clone());
        summary
    }

    /// Aggregates all closed sheets into the run result.
    pub fn finish(self) -> OptimizationResult {
        OptimizationResult {
            sheet: self.sheet,
            placements: self.placements,
            sheets: self.summaries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::Piece;
    use crate::types::Orientation;

    #[test]
    fn quota_limits_opened_sheets() {
        let mut tracker = FreeSpaceTracker::new();
        let mut allocator = SheetAllocator::new(Sheet::new(10.0, 10.0).unwrap(), 2);

        assert_eq!(allocator.open_sheet(&mut tracker), Some(0));
        assert_eq!(allocator.open_sheet(&mut tracker), Some(1));
        assert_eq!(allocator.open_sheet(&mut tracker), None);
        assert_eq!(allocator.opened(), 2);
        assert_eq!(tracker.regions(1).len(), 1);
    }

    #[test]
    fn closed_sheets_are_summarized_in_order() {
        let sheet = Sheet::new(100.0, 100.0).unwrap();
        let mut tracker = FreeSpaceTracker::new();
        let mut allocator = SheetAllocator::new(sheet, 4);
        let piece = Piece::new(7, 50.0, 50.0).unwrap();

        let index = allocator.open_sheet(&mut tracker).unwrap();
        let fit = tracker
            .best_fit(index, piece.dimensions(), true)
            .expect("empty sheet holds the piece");
        let footprint = tracker.place(index, &fit).unwrap();
        let placement = Placement::new(&piece, index, footprint, Orientation::Upright);

        let summary = allocator.close_sheet(index, vec![placement], &tracker);
        assert_eq!(summary.placed_count, 1);
        assert_eq!(summary.used_area, 2500.0);
        assert_eq!(summary.free_area, 7500.0);
        assert_eq!(summary.free_region_count, 2);
        assert_eq!(summary.utilization, 0.25);

        let result = allocator.finish();
        assert_eq!(result.sheet_count(), 1);
        assert_eq!(result.placements[0].footprint(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }
}
