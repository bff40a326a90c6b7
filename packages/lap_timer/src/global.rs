//! Free-function interface over a per-thread profiler.
//!
//! This is for code that cannot easily thread a [`Profiler`] through to every checkpoint.
//! Each thread has its own independent profiler, created by [`init()`]. Every other function
//! returns [`Error::NotInitialized`] until `init()` has been called on the current thread.
//!
//! # Example
//!
//! ```
//! use lap_timer::global;
//!
//! global::init(2, 10).unwrap();
//!
//! for _ in 0..10 {
//!     global::reset().unwrap();
//!     global::sample().unwrap();
//!     std::hint::black_box((0..100).sum::<u64>());
//!     global::sample().unwrap();
//!     global::advance().unwrap();
//! }
//!
//! global::report().unwrap();
//! ```

use std::cell::RefCell;

use crate::{Error, Profiler, Report, Result};

thread_local! {
    static PROFILER: RefCell<Option<Profiler>> = const { RefCell::new(None) };
}

fn with_profiler<R>(f: impl FnOnce(&mut Profiler) -> Result<R>) -> Result<R> {
    PROFILER.with_borrow_mut(|profiler| profiler.as_mut().ok_or(Error::NotInitialized).and_then(f))
}

/// Creates this thread's profiler, discarding any profiler and data it had before.
///
/// See [`Profiler::new()`].
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if either argument is zero. Any existing profiler
/// is kept in that case.
pub fn init(slots: usize, iterations: usize) -> Result<()> {
    let profiler = Profiler::new(slots, iterations)?;

    PROFILER.with_borrow_mut(|current| *current = Some(profiler));
    Ok(())
}

/// See [`Profiler::reset()`].
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`init()`] has not been called on this thread,
/// or [`Error::ClockFailure`] if the clock cannot be read.
pub fn reset() -> Result<()> {
    with_profiler(Profiler::reset)
}

/// See [`Profiler::sample()`].
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`init()`] or [`reset()`] has not been called
/// on this thread, or [`Error::ClockFailure`] if the clock cannot be read.
pub fn sample() -> Result<()> {
    with_profiler(Profiler::sample)
}

/// See [`Profiler::advance()`].
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`init()`] has not been called on this thread.
pub fn advance() -> Result<()> {
    with_profiler(|profiler| {
        profiler.advance();
        Ok(())
    })
}

/// Returns a report of this thread's profiler without printing it.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`init()`] has not been called on this thread.
pub fn snapshot() -> Result<Report> {
    with_profiler(|profiler| Ok(profiler.report()))
}

/// Prints a report of this thread's profiler to stdout.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`init()`] has not been called on this thread.
#[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
pub fn report() -> Result<()> {
    snapshot().map(|report| report.print_to_stdout())
}
