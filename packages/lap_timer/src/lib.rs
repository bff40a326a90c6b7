#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Rough, low-overhead latency distributions for repeated code paths.
//!
//! A [`Profiler`] records the time that elapses between successive checkpoints of a loop,
//! classifies each interval into one of 22 logarithmic buckets and renders the per-checkpoint
//! distributions as compact ASCII histograms. It covers intervals from under a microsecond
//! up to about a second, with everything longer collected in an overflow bucket.
//!
//! This package is a development tool. It does not compute means or percentiles, persist
//! data or support concurrent sampling.
//!
//! # Sampling
//!
//! Each iteration of the measured loop is a *sweep* through a fixed number of checkpoint
//! *slots*. Call [`reset()`][Profiler::reset] at the start of the sweep, then
//! [`sample()`][Profiler::sample] at every checkpoint, then [`advance()`][Profiler::advance]
//! when the sweep is done:
//!
//! ```
//! use std::hint::black_box;
//!
//! use lap_timer::Profiler;
//!
//! let mut profiler = Profiler::new(3, 100).unwrap();
//!
//! for i in 0..100_u64 {
//!     profiler.reset().unwrap();
//!
//!     black_box(i.wrapping_mul(3));
//!     profiler.sample().unwrap(); // slot 0
//!
//!     black_box((0..i).sum::<u64>());
//!     profiler.sample().unwrap(); // slot 1
//!
//!     black_box(format!("{i}"));
//!     profiler.sample().unwrap(); // slot 2
//!
//!     profiler.advance();
//! }
//!
//! profiler.print_report();
//! ```
//!
//! The profiler keeps the last `iterations` sweeps in a ring buffer, so a long-running loop
//! reports on its most recent activity.
//!
//! # Reading the report
//!
//! Every slot is drawn as three lines, followed by one axis label line for the whole report:
//!
//! ```text
//! |: :                     .
//! |: :             .       :
//! +- ---------- ---------- -
//!        us         ms
//! ```
//!
//! Each column is one bucket. The leftmost column is "less than a microsecond", then come
//! ten microsecond-scale buckets, ten millisecond-scale buckets and finally one bucket for
//! a second or more. A bucket hit by only a few iterations shows as `.` on the middle line,
//! a bucket hit by most iterations fills both lines with `:`.
//!
//! For programmatic access, iterate [`Report::slots()`].
//!
//! # Clock selection
//!
//! The default clock is monotonic. Use [`Profiler::builder()`] to select the wall clock
//! instead. Should a clock ever go backwards between two checkpoints, the interval is
//! recorded as zero.
//!
//! # Global interface
//!
//! When passing a profiler around is inconvenient, the [`global`] module offers the same
//! operations as free functions over a per-thread profiler.

mod bucket;
mod builder;
mod error;
pub mod global;
mod pal;
mod profiler;
mod report;
mod scale;
mod store;

pub use bucket::*;
pub use builder::*;
pub use error::*;
pub use profiler::*;
pub use report::*;
pub use scale::*;
