use std::num::NonZero;

use tracing::{debug, trace};

use crate::builder::required_dimension;
use crate::pal::{TimeSource, TimeSourceFacade};
use crate::store::SampleStore;
use crate::{ClockKind, Error, ProfilerBuilder, Report, Result, bucket_of};

/// Records elapsed time between successive checkpoints of a repeated code path.
///
/// A profiler owns a fixed grid of samples: one row per checkpoint *slot* and one cell per
/// *iteration*. Each cell holds the logarithmic [`Bucket`](crate::Bucket) of the time that
/// elapsed before that checkpoint was reached. The grid is a ring buffer over iterations;
/// once every iteration has been filled, the oldest data is overwritten.
///
/// # Sampling protocol
///
/// A well-formed sweep is `reset()`, then exactly [`slot_count()`](Self::slot_count) calls to
/// `sample()`, then `advance()`. The profiler does not verify this - extra or missing samples
/// shift which slot receives which measurement.
///
/// # Example
///
/// ```
/// use lap_timer::Profiler;
///
/// let mut profiler = Profiler::new(2, 10).unwrap();
///
/// for _ in 0..10 {
///     profiler.reset().unwrap();
///     // First checkpoint: nothing happens in between.
///     profiler.sample().unwrap();
///     std::thread::sleep(std::time::Duration::from_micros(200));
///     // Second checkpoint: measures the sleep.
///     profiler.sample().unwrap();
///     profiler.advance();
/// }
///
/// println!("{}", profiler.report());
/// ```
///
/// # Threading
///
/// A profiler is meant for serial measurement on a single thread. It may be moved between
/// threads but all operations take `&mut self`, so concurrent use requires external
/// synchronization.
#[derive(Debug)]
pub struct Profiler {
    store: SampleStore,

    // Always < store.slot_count(). Returns to 0 at the start of every iteration.
    current_slot: usize,

    // Always < store.iteration_count().
    current_iteration: usize,

    // None until the first reset().
    last_timestamp_micros: Option<u64>,

    time_source: TimeSourceFacade,
    clock: ClockKind,
}

impl Profiler {
    /// Creates a profiler with `slots` checkpoints per iteration and room for `iterations`
    /// iterations, reading time from the default monotonic clock.
    ///
    /// Every cell starts out unset. Call [`reset()`](Self::reset) before the first sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if either argument is zero.
    pub fn new(slots: usize, iterations: usize) -> Result<Self> {
        Self::builder().slots(slots).iterations(iterations).build()
    }

    /// Starts building a profiler with non-default settings.
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::new()
    }

    pub(crate) fn from_parts(
        slot_count: NonZero<usize>,
        iteration_count: NonZero<usize>,
        time_source: TimeSourceFacade,
        clock: ClockKind,
    ) -> Self {
        Self {
            store: SampleStore::new(slot_count, iteration_count),
            current_slot: 0,
            current_iteration: 0,
            last_timestamp_micros: None,
            time_source,
            clock,
        }
    }

    /// Discards all recorded data and starts over with new dimensions.
    ///
    /// The cursor returns to slot 0 of iteration 0 and a new [`reset()`](Self::reset) is
    /// required before sampling. The clock selection is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if either argument is zero.
    /// The existing data is left untouched in that case.
    pub fn reinitialize(&mut self, slots: usize, iterations: usize) -> Result<()> {
        let slot_count = required_dimension(Some(slots), "slot count")?;
        let iteration_count = required_dimension(Some(iterations), "iteration count")?;

        self.store = SampleStore::new(slot_count, iteration_count);
        self.current_slot = 0;
        self.current_iteration = 0;
        self.last_timestamp_micros = None;

        debug!(slots, iterations, clock = ?self.clock, "reinitialized profiler");

        Ok(())
    }

    /// Sets the reference timestamp that the next [`sample()`](Self::sample) measures from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockFailure`](crate::Error::ClockFailure) if the clock cannot be read.
    pub fn reset(&mut self) -> Result<()> {
        self.last_timestamp_micros = Some(self.time_source.now_micros()?);
        Ok(())
    }

    /// Records the time elapsed since the previous sample or reset into the current slot,
    /// then moves to the next slot.
    ///
    /// The reference timestamp for the next sample is taken after the recording is done,
    /// so consecutive samples measure only the code between them and not the profiler's
    /// own bookkeeping. A clock that went backwards is recorded as zero elapsed time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`](crate::Error::NotInitialized) if
    /// [`reset()`](Self::reset) has never been called.
    ///
    /// Returns [`Error::ClockFailure`](crate::Error::ClockFailure) if the clock cannot be read.
    /// If the measuring read fails, nothing is recorded. If the read that follows the recording
    /// fails, the sample has already been recorded and the cursor has already moved to the next
    /// slot, but there is no reference timestamp left, so the next `sample()` returns
    /// [`Error::NotInitialized`](crate::Error::NotInitialized) until [`reset()`](Self::reset)
    /// is called again.
    #[inline]
    pub fn sample(&mut self) -> Result<()> {
        let last = self.last_timestamp_micros.ok_or(Error::NotInitialized)?;

        let now = self.time_source.now_micros()?;

        self.store.record(
            self.current_slot,
            self.current_iteration,
            bucket_of(now.saturating_sub(last)),
        );
        self.current_slot = next_index(self.current_slot, self.store.slot_count());

        // A failed read must not leave the previous reference behind for the next sample.
        self.last_timestamp_micros = None;
        self.last_timestamp_micros = Some(self.time_source.now_micros()?);
        Ok(())
    }

    /// Moves to the next iteration and back to the first slot.
    ///
    /// After the last iteration this wraps around to iteration 0, after which new samples
    /// overwrite the oldest data. This does not reset the reference timestamp.
    pub fn advance(&mut self) {
        self.current_iteration = next_index(self.current_iteration, self.store.iteration_count());
        self.current_slot = 0;

        if self.current_iteration == 0 {
            trace!(
                iterations = self.store.iteration_count().get(),
                "sample store wrapped around, oldest iterations will be overwritten"
            );
        }
    }

    /// Generates a report of the per-slot bucket distributions recorded so far.
    ///
    /// The report is a snapshot; later sampling does not affect it.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::from_store(&self.store)
    }

    /// Prints the report to stdout.
    ///
    /// This is a convenience method equivalent to `self.report().print_to_stdout()`.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_report(&self) {
        self.report().print_to_stdout();
    }

    /// The clock this profiler reads timestamps from.
    #[must_use]
    pub fn clock(&self) -> ClockKind {
        self.clock
    }

    /// Number of checkpoint slots sampled per iteration.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.store.slot_count().get()
    }

    /// Number of iterations retained per slot.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.store.iteration_count().get()
    }

    /// The slot the next [`sample()`](Self::sample) records into.
    #[must_use]
    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// The iteration the next [`sample()`](Self::sample) records into.
    #[must_use]
    pub fn current_iteration(&self) -> usize {
        self.current_iteration
    }

    /// The raw cells recorded for a slot, in iteration order.
    ///
    /// Each cell is either a [`Bucket`](crate::Bucket) or [`UNSET_CELL`](crate::UNSET_CELL).
    /// Returns `None` if `slot` is out of range.
    #[must_use]
    pub fn samples(&self, slot: usize) -> Option<&[u8]> {
        self.store.row(slot)
    }

    #[cfg(test)]
    pub(crate) fn with_time_source(
        slots: usize,
        iterations: usize,
        time_source: impl Into<TimeSourceFacade>,
    ) -> Result<Self> {
        Self::builder()
            .slots(slots)
            .iterations(iterations)
            .build_with_time_source(time_source.into())
    }
}

/// Increments a ring index that is always below `len`.
#[inline]
fn next_index(index: usize, len: NonZero<usize>) -> usize {
    let next = index.wrapping_add(1);

    if next >= len.get() { 0 } else { next }
}
