use std::num::NonZero;

use tracing::debug;

use crate::pal::TimeSourceFacade;
use crate::{Error, Profiler, Result};

/// Selects the clock a [`Profiler`] reads timestamps from.
///
/// The choice is made once, when the profiler is built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum ClockKind {
    /// A monotonic clock that never goes backwards. This is the default.
    #[default]
    Monotonic,

    /// The system wall clock, measured from the Unix epoch.
    ///
    /// Wall clock adjustments can make a measured delta negative, in which case
    /// the sample is recorded as taking zero time.
    WallClock,
}

/// Creates instances of [`Profiler`].
///
/// Required parameters:
/// * `slots`
/// * `iterations`
///
/// Use `Profiler::builder()` to create a new instance of this builder.
///
/// # Example
///
/// ```
/// use lap_timer::{ClockKind, Profiler};
///
/// let profiler = Profiler::builder()
///     .slots(3)
///     .iterations(1000)
///     .clock(ClockKind::WallClock)
///     .build()
///     .unwrap();
///
/// assert_eq!(profiler.slot_count(), 3);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ProfilerBuilder {
    slots: Option<usize>,
    iterations: Option<usize>,
    clock: ClockKind,
}

impl ProfilerBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the number of checkpoint slots sampled per iteration. This is a required property
    /// and must be at least 1.
    pub fn slots(self, slots: usize) -> Self {
        Self {
            slots: Some(slots),
            ..self
        }
    }

    /// Sets the number of iterations retained per slot before the oldest data is overwritten.
    /// This is a required property and must be at least 1.
    pub fn iterations(self, iterations: usize) -> Self {
        Self {
            iterations: Some(iterations),
            ..self
        }
    }

    /// Sets the clock to read timestamps from.
    ///
    /// Defaults to [`ClockKind::Monotonic`].
    pub fn clock(self, clock: ClockKind) -> Self {
        Self { clock, ..self }
    }

    /// Validates the configuration and creates the profiler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the slot count or iteration count is missing or zero.
    pub fn build(self) -> Result<Profiler> {
        let clock = self.clock;
        self.build_with_time_source(TimeSourceFacade::real(clock))
    }

    pub(crate) fn build_with_time_source(self, time_source: TimeSourceFacade) -> Result<Profiler> {
        let (slot_count, iteration_count) = self.dimensions()?;

        debug!(
            slot_count = slot_count.get(),
            iteration_count = iteration_count.get(),
            clock = ?self.clock,
            "created profiler"
        );

        Ok(Profiler::from_parts(
            slot_count,
            iteration_count,
            time_source,
            self.clock,
        ))
    }

    fn dimensions(&self) -> Result<(NonZero<usize>, NonZero<usize>)> {
        Ok((
            required_dimension(self.slots, "slot count")?,
            required_dimension(self.iterations, "iteration count")?,
        ))
    }
}

pub(crate) fn required_dimension(value: Option<usize>, name: &str) -> Result<NonZero<usize>> {
    let value = value.ok_or_else(|| Error::InvalidConfig {
        problem: format!("{name} is required"),
    })?;

    NonZero::new(value).ok_or_else(|| Error::InvalidConfig {
        problem: format!("{name} must be at least 1"),
    })
}
