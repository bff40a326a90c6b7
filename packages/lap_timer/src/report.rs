//! Per-slot bucket histograms and their ASCII rendering.

use std::fmt::{self, Display, Write};
use std::num::NonZero;
use std::ops::Range;

use tracing::debug;

use crate::store::{SampleStore, bucket_counts};
use crate::{BUCKET_COUNT, intensity_of};

/// Glyph ramps are indexed by intensity level, `0..=4`.
const RAMP_LEN: usize = 5;

/// Top row of a slot histogram. Only the two highest intensity levels show up here.
const SPARSE_RAMP: [char; RAMP_LEN] = [' ', ' ', ' ', '.', ':'];

/// Middle row of a slot histogram. Any nonzero intensity shows up here.
const DENSE_RAMP: [char; RAMP_LEN] = [' ', '.', ':', ':', ':'];

/// Bottom row of a slot histogram, drawn as a baseline regardless of intensity.
const RULE_RAMP: [char; RAMP_LEN] = ['-'; RAMP_LEN];

/// Buckets are drawn in four groups separated by a space:
/// less than a microsecond, microseconds, milliseconds and overflow.
const BUCKET_GROUPS: [Range<usize>; 4] = [0..1, 1..11, 11..21, 21..BUCKET_COUNT];

/// Printed once after all slots, placing the unit labels under the
/// microsecond and millisecond groups.
const AXIS_LABEL: &str = "       us         ms      ";

/// A snapshot of the bucket distribution of every slot of a [`Profiler`](crate::Profiler).
///
/// For human-readable output, use the `Display` trait implementation. This renders
/// a compact histogram of three lines per slot, followed by a single axis label line,
/// using only the basic ASCII character set. Each histogram column is one bucket, with
/// the groups for less than a microsecond, microseconds, milliseconds and overflow
/// separated by a space. The more often a bucket was hit, the denser its glyphs.
///
/// For machine-readable output, inspect report contents via [`slots()`](Self::slots).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    iteration_count: NonZero<usize>,

    // In slot order.
    slots: Box<[SlotHistogram]>,
}

impl Report {
    pub(crate) fn from_store(store: &SampleStore) -> Self {
        let iteration_count = store.iteration_count();

        let slots = store
            .rows()
            .enumerate()
            .map(|(index, row)| SlotHistogram::new(index, bucket_counts(row), iteration_count))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            slots = slots.len(),
            populated_cells = store.populated_cells(),
            "generated profiler report"
        );

        Self {
            iteration_count,
            slots,
        }
    }

    /// Iterates over the histograms of all slots, in slot order.
    ///
    /// # Example
    ///
    /// ```
    /// use lap_timer::Profiler;
    ///
    /// let mut profiler = Profiler::new(2, 4).unwrap();
    ///
    /// profiler.reset().unwrap();
    /// profiler.sample().unwrap();
    /// profiler.sample().unwrap();
    /// profiler.advance();
    ///
    /// for slot in profiler.report().slots() {
    ///     let recorded: usize = slot.counts().iter().sum();
    ///     println!("slot {}: {recorded} samples", slot.index());
    /// }
    /// ```
    pub fn slots(&self) -> impl Iterator<Item = &SlotHistogram> {
        self.slots.iter()
    }

    /// Number of iterations each slot retains, the denominator for intensity scaling.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.iteration_count.get()
    }

    /// Whether no samples at all have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.counts.iter().all(|&count| count == 0))
    }

    /// Prints the report to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot}")?;
        }

        writeln!(f, "{AXIS_LABEL}")
    }
}

/// The bucket distribution of one slot, part of a [`Report`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotHistogram {
    index: usize,
    counts: [usize; BUCKET_COUNT],
    intensities: [u8; BUCKET_COUNT],
}

impl SlotHistogram {
    fn new(index: usize, counts: [usize; BUCKET_COUNT], iterations: NonZero<usize>) -> Self {
        Self {
            index,
            counts,
            intensities: counts.map(|count| intensity_of(count, iterations)),
        }
    }

    /// Index of the slot this histogram describes.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of retained iterations that fell into each bucket.
    ///
    /// Iterations that were never sampled are not counted, so the sum may be less than
    /// the iteration count.
    #[must_use]
    pub fn counts(&self) -> &[usize; BUCKET_COUNT] {
        &self.counts
    }

    /// The intensity level (see [`intensity_of()`]) of each bucket, as used for rendering.
    #[must_use]
    pub fn intensities(&self) -> &[u8; BUCKET_COUNT] {
        &self.intensities
    }

    fn write_row(&self, prefix: char, ramp: &[char; RAMP_LEN], f: &mut impl Write) -> fmt::Result {
        f.write_char(prefix)?;

        for (group_index, group) in BUCKET_GROUPS.iter().enumerate() {
            if group_index > 0 {
                f.write_char(' ')?;
            }

            let intensities = self
                .intensities
                .get(group.clone())
                .expect("bucket groups lie within the bucket range");

            for &intensity in intensities {
                let glyph = ramp
                    .get(usize::from(intensity))
                    .expect("intensity_of() never exceeds MAX_INTENSITY");

                f.write_char(*glyph)?;
            }
        }

        f.write_char('\n')
    }
}

impl Display for SlotHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_row('|', &SPARSE_RAMP, f)?;
        self.write_row('|', &DENSE_RAMP, f)?;
        self.write_row('+', &RULE_RAMP, f)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::indexing_slicing, reason = "panic is fine in tests")]

    use new_zealand::nz;

    use super::*;
    use crate::{MAX_INTENSITY, OVERFLOW_BUCKET, UNSET_CELL};

    /// Every rendered line has the same width: prefix, 22 buckets and 3 group separators.
    const LINE_WIDTH: usize = 26;

    fn store_with_row(row: &[u8]) -> SampleStore {
        let iterations = NonZero::new(row.len()).unwrap();
        let mut store = SampleStore::new(nz!(1), iterations);

        for (iteration, &bucket) in row.iter().enumerate() {
            store.record(0, iteration, bucket);
        }

        store
    }

    #[test]
    fn empty_store_renders_blank_histograms() {
        let store = SampleStore::new(nz!(2), nz!(3));
        let report = Report::from_store(&store);

        assert!(report.is_empty());

        let blank = format!("|{}", " ".repeat(25));
        let rule = "+- ---------- ---------- -";
        let expected = format!("{blank}\n{blank}\n{rule}\n{blank}\n{blank}\n{rule}\n{AXIS_LABEL}\n");

        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn single_hits_out_of_four_render_at_level_three() {
        let report = Report::from_store(&store_with_row(&[0, 1, 10, 11]));

        let expected = [
            format!("|{} {} {} {}", ".", ".        .", ".         ", " "),
            format!("|{} {} {} {}", ":", ":        :", ":         ", " "),
            "+- ---------- ---------- -".to_string(),
            AXIS_LABEL.to_string(),
        ]
        .map(|line| line + "\n")
        .concat();

        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn full_intensity_renders_colon_on_both_rows() {
        let report = Report::from_store(&store_with_row(&[OVERFLOW_BUCKET; 10]));

        let text = report.to_string();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], format!("|{}:", " ".repeat(24)));
        assert_eq!(lines[1], format!("|{}:", " ".repeat(24)));
    }

    #[test]
    fn low_intensity_only_shows_on_dense_row() {
        // One hit out of 100 is intensity 1.
        let mut row = [UNSET_CELL; 100];
        row[0] = 5;
        let report = Report::from_store(&store_with_row(&row));

        let text = report.to_string();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], format!("|{}", " ".repeat(25)));
        assert_eq!(lines[1].chars().nth(7), Some('.'));
        assert_eq!(lines[1].chars().filter(|&c| c != ' ').count(), 2);
    }

    #[test]
    fn every_line_has_same_width() {
        let report = Report::from_store(&store_with_row(&[0, 3, 3, 12, 20, 21, UNSET_CELL]));

        for line in report.to_string().lines() {
            assert_eq!(line.len(), LINE_WIDTH, "line {line:?}");
        }
    }

    #[test]
    fn unset_cells_are_not_counted() {
        let report = Report::from_store(&store_with_row(&[UNSET_CELL, UNSET_CELL, 7]));
        let slot = report.slots().next().unwrap();

        assert_eq!(slot.counts().iter().sum::<usize>(), 1);
        assert_eq!(slot.counts()[7], 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn slots_are_in_order() {
        let mut store = SampleStore::new(nz!(3), nz!(1));
        store.record(0, 0, 1);
        store.record(1, 0, 2);
        store.record(2, 0, 3);

        let report = Report::from_store(&store);

        let indexes = report.slots().map(SlotHistogram::index).collect::<Vec<_>>();
        assert_eq!(indexes, vec![0, 1, 2]);

        for (slot, expected_bucket) in report.slots().zip([1, 2, 3]) {
            assert_eq!(slot.counts()[expected_bucket], 1);
        }

        assert_eq!(report.iteration_count(), 1);
    }

    #[test]
    fn rendering_is_repeatable() {
        let report = Report::from_store(&store_with_row(&[0, 0, 4, 15]));

        assert_eq!(report.to_string(), report.to_string());
        assert_eq!(report, report.clone());
    }

    #[test]
    fn ramps_cover_every_intensity() {
        assert_eq!(RAMP_LEN, usize::from(MAX_INTENSITY) + 1);
    }

    #[test]
    fn axis_label_aligns_with_groups() {
        assert_eq!(AXIS_LABEL.len(), LINE_WIDTH);

        // "us" sits inside the microsecond group, "ms" inside the millisecond group.
        let us = AXIS_LABEL.find("us").unwrap();
        let ms = AXIS_LABEL.find("ms").unwrap();
        assert!((3..13).contains(&us));
        assert!((14..24).contains(&ms));
    }
}
