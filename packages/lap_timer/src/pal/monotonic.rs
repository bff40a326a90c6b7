use std::time::Instant;

use tracing::warn;

use crate::pal::TimeSource;
use crate::{Error, Result};

/// Monotonic time source measuring microseconds since its own creation.
#[derive(Clone, Debug)]
pub(crate) struct MonotonicTimeSource {
    epoch: Instant,
}

impl MonotonicTimeSource {
    pub(crate) fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now_micros(&self) -> Result<u64> {
        let elapsed = self.epoch.elapsed().as_micros();

        u64::try_from(elapsed).map_err(|_| {
            warn!(elapsed_micros = %elapsed, "monotonic clock exceeded the u64 microsecond range");

            Error::ClockFailure {
                problem: format!("{elapsed} microseconds since epoch does not fit in u64"),
            }
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn starts_near_zero() {
        let source = MonotonicTimeSource::new();

        // Generous bound, we only care that the epoch is the creation time.
        assert!(source.now_micros().unwrap() < 10_000_000);
    }

    #[test]
    fn never_goes_backwards() {
        let source = MonotonicTimeSource::new();

        let mut previous = source.now_micros().unwrap();

        for _ in 0..1000 {
            let now = source.now_micros().unwrap();
            assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn observes_sleep() {
        let source = MonotonicTimeSource::new();

        let before = source.now_micros().unwrap();
        thread::sleep(Duration::from_millis(2));
        let after = source.now_micros().unwrap();

        assert!(after.saturating_sub(before) >= 2000);
    }
}
