//! Platform abstraction layer for timestamp capture.
//!
//! The profiler only ever talks to [`TimeSourceFacade`], which is selected once when the
//! profiler is built. Tests swap in a fake or mock time source through the same facade.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod monotonic;
mod wall_clock;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
#[cfg(test)]
pub(crate) use fake::*;
pub(crate) use monotonic::*;
pub(crate) use wall_clock::*;
