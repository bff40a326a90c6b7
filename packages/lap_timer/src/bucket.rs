//! Logarithmic classification of elapsed time into histogram buckets.

/// Index of an elapsed-time magnitude class, in `0..BUCKET_COUNT`.
///
/// Bucket `n` holds deltas whose bit length is `n`:
///
/// * bucket 0 - less than one microsecond
/// * buckets 1..=10 - 1 to 1023 microseconds
/// * buckets 11..=20 - 1024 microseconds to about 1.05 seconds
/// * bucket 21 - everything longer
pub type Bucket = u8;

/// Number of distinct buckets a delta can be classified into.
pub const BUCKET_COUNT: usize = 22;

/// The catch-all bucket for deltas of about 1.05 seconds or more.
pub const OVERFLOW_BUCKET: Bucket = 21;

/// Reserved cell value marking a sample store cell that has never been written.
///
/// This is outside the bucket range, so it never matches a real bucket when counting.
pub const UNSET_CELL: u8 = u8::MAX;

/// Classifies an elapsed duration in microseconds into a [`Bucket`].
///
/// Returns the bit length of `delta_micros`, capped at [`OVERFLOW_BUCKET`].
///
/// # Example
///
/// ```
/// use lap_timer::bucket_of;
///
/// assert_eq!(bucket_of(0), 0);
/// assert_eq!(bucket_of(1023), 10);
/// assert_eq!(bucket_of(1024), 11);
/// ```
#[inline]
#[must_use]
pub const fn bucket_of(delta_micros: u64) -> Bucket {
    let Some(bit_length) = u64::BITS.checked_sub(delta_micros.leading_zeros()) else {
        panic!("leading zeros never exceed the bit width");
    };

    #[expect(
        clippy::cast_possible_truncation,
        reason = "bit length of a u64 is at most 64, which always fits in u8"
    )]
    let bit_length = bit_length as u8;

    if bit_length > OVERFLOW_BUCKET {
        OVERFLOW_BUCKET
    } else {
        bit_length
    }
}
