use thiserror::Error;

/// Errors that can occur when configuring or driving a [`Profiler`](crate::Profiler).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The profiler was configured with dimensions that cannot hold any samples.
    #[error("invalid profiler configuration: {problem}")]
    InvalidConfig {
        /// A human-readable description of the problem.
        problem: String,
    },

    /// A sampling operation was attempted before the profiler was ready for it.
    ///
    /// This happens when [`sample()`](crate::Profiler::sample) is called before the first
    /// [`reset()`](crate::Profiler::reset), or when a function in [`global`](crate::global)
    /// is called on a thread that has not called [`global::init()`](crate::global::init).
    #[error("profiler is not initialized")]
    NotInitialized,

    /// The time source could not produce a timestamp.
    ///
    /// Profiling cannot proceed without timing, so callers should treat this as fatal.
    #[error("time source failure: {problem}")]
    ClockFailure {
        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for profiler operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn display_includes_problem() {
        let error = Error::InvalidConfig {
            problem: "slot count must be at least 1".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "invalid profiler configuration: slot count must be at least 1"
        );
    }

    #[test]
    fn clock_failure_display_includes_problem() {
        let error = Error::ClockFailure {
            problem: "system time is before the Unix epoch".to_string(),
        };

        assert!(error.to_string().contains("before the Unix epoch"));
    }
}
