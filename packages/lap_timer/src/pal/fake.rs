//! Fake time source for tests that need exact control over elapsed time.

use std::sync::{Arc, Mutex};

use crate::Result;
use crate::pal::TimeSource;

/// Time source that returns whatever the test last set.
///
/// Clones share the same underlying clock, so a test can keep one handle and move
/// another into the profiler.
#[derive(Clone, Debug)]
pub(crate) struct FakeTimeSource {
    now_micros: Arc<Mutex<u64>>,
}

impl FakeTimeSource {
    pub(crate) fn new() -> Self {
        Self {
            now_micros: Arc::new(Mutex::new(0)),
        }
    }

    pub(crate) fn set(&self, micros: u64) {
        *self
            .now_micros
            .lock()
            .expect("FakeTimeSource lock should not be poisoned") = micros;
    }

    pub(crate) fn advance(&self, micros: u64) {
        let mut now = self
            .now_micros
            .lock()
            .expect("FakeTimeSource lock should not be poisoned");

        *now = now
            .checked_add(micros)
            .expect("fake clock advanced beyond u64 range");
    }
}

impl TimeSource for FakeTimeSource {
    fn now_micros(&self) -> Result<u64> {
        Ok(*self
            .now_micros
            .lock()
            .expect("FakeTimeSource lock should not be poisoned"))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(FakeTimeSource::new().now_micros().unwrap(), 0);
    }

    #[test]
    fn clones_share_state() {
        let source = FakeTimeSource::new();
        let handle = source.clone();

        handle.set(100);
        handle.advance(23);

        assert_eq!(source.now_micros().unwrap(), 123);
    }
}
