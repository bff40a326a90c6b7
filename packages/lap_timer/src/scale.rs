//! Compression of per-bucket occurrence counts into glyph intensity levels.

use std::num::NonZero;

use new_zealand::nz;

/// Occurrence counts are first stretched onto `0..=15` before taking the bit length,
/// which yields five intensity levels.
const INTENSITY_RESOLUTION: NonZero<usize> = nz!(15);

/// Highest intensity level [`intensity_of()`] can return.
pub const MAX_INTENSITY: u8 = 4;

/// Compresses how often a bucket was hit, out of `iterations`, into an intensity level
/// in `0..=MAX_INTENSITY` for glyph selection.
///
/// The level is the bit length of `ceil(15 * count / iterations)`, so any nonzero count
/// gives at least level 1 and `count == iterations` gives [`MAX_INTENSITY`].
///
/// Counts above `iterations` are treated as `iterations`.
///
/// # Example
///
/// ```
/// use std::num::NonZero;
///
/// use lap_timer::intensity_of;
///
/// let iterations = NonZero::new(4).unwrap();
///
/// assert_eq!(intensity_of(0, iterations), 0);
/// assert_eq!(intensity_of(1, iterations), 3);
/// assert_eq!(intensity_of(4, iterations), 4);
/// ```
#[must_use]
pub fn intensity_of(count: usize, iterations: NonZero<usize>) -> u8 {
    let count = count.min(iterations.get());

    // count <= iterations, so this is at most INTENSITY_RESOLUTION.
    let scaled = count
        .checked_mul(INTENSITY_RESOLUTION.get())
        .map_or(INTENSITY_RESOLUTION.get(), |stretched| {
            stretched.div_ceil(iterations.get())
        });

    let bit_length = usize::BITS
        .checked_sub(scaled.leading_zeros())
        .expect("leading zeros never exceed the bit width");

    u8::try_from(bit_length).expect("bit length of a value up to 15 always fits in u8")
}
