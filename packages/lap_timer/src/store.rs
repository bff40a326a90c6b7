use std::num::NonZero;

use crate::{BUCKET_COUNT, Bucket, UNSET_CELL};

/// Fixed-capacity sample buffer with one row per slot and one cell per iteration.
///
/// Each cell holds either a [`Bucket`] or [`UNSET_CELL`] if nothing has been recorded into it
/// yet. Cells are single bytes stored slot-major in one allocation, so each slot's row is a
/// contiguous slice.
///
/// The dimensions never change after construction. Resizing means building a new store.
#[derive(Clone, Debug)]
pub(crate) struct SampleStore {
    slot_count: NonZero<usize>,
    iteration_count: NonZero<usize>,

    cells: Box<[u8]>,
}

impl SampleStore {
    pub(crate) fn new(slot_count: NonZero<usize>, iteration_count: NonZero<usize>) -> Self {
        let len = slot_count
            .checked_mul(iteration_count)
            .expect("sample store dimensions overflow usize - unrealistic configuration");

        Self {
            slot_count,
            iteration_count,
            cells: vec![UNSET_CELL; len.get()].into_boxed_slice(),
        }
    }

    pub(crate) fn slot_count(&self) -> NonZero<usize> {
        self.slot_count
    }

    pub(crate) fn iteration_count(&self) -> NonZero<usize> {
        self.iteration_count
    }

    /// Overwrites the cell for the given slot and iteration.
    ///
    /// # Panics
    ///
    /// Panics if `slot` or `iteration` is outside the store dimensions.
    pub(crate) fn record(&mut self, slot: usize, iteration: usize, bucket: Bucket) {
        assert!(
            iteration < self.iteration_count.get(),
            "iteration {iteration} out of bounds for {} iterations",
            self.iteration_count
        );

        let index = slot
            .checked_mul(self.iteration_count.get())
            .and_then(|row_start| row_start.checked_add(iteration))
            .expect("cell index overflow is impossible for an allocated store");

        let cell = self
            .cells
            .get_mut(index)
            .expect("slot out of bounds - the profiler cursor must stay below slot_count");

        *cell = bucket;
    }

    /// The cells recorded for one slot, in iteration order.
    pub(crate) fn row(&self, slot: usize) -> Option<&[u8]> {
        self.cells.chunks_exact(self.iteration_count.get()).nth(slot)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.iteration_count.get())
    }

    /// Number of cells that hold a real bucket value.
    pub(crate) fn populated_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != UNSET_CELL).count()
    }
}

/// Counts how many cells of a row fall into each bucket.
///
/// Unset cells fall outside the bucket range and are not counted anywhere.
pub(crate) fn bucket_counts(row: &[u8]) -> [usize; BUCKET_COUNT] {
    let mut counts = [0_usize; BUCKET_COUNT];

    for &cell in row {
        if let Some(count) = counts.get_mut(usize::from(cell)) {
            *count = count.saturating_add(1);
        }
    }

    counts
}
