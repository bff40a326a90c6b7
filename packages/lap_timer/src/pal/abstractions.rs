use std::fmt::Debug;

use crate::Result;

/// Provides the current instant as whole microseconds since an arbitrary epoch.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait TimeSource: Debug + Send {
    /// Returns the current timestamp in microseconds.
    ///
    /// Consecutive calls are expected to be non-decreasing but callers must tolerate
    /// a timestamp that goes backwards.
    fn now_micros(&self) -> Result<u64>;
}
