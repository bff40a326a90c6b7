use std::fmt::{self, Debug};

use crate::pal::{MonotonicTimeSource, TimeSource, WallClockTimeSource};
#[cfg(test)]
use crate::pal::{FakeTimeSource, MockTimeSource};
use crate::{ClockKind, Result};

/// The time source a profiler reads from, fixed at construction.
pub(crate) enum TimeSourceFacade {
    Monotonic(MonotonicTimeSource),
    WallClock(WallClockTimeSource),

    #[cfg(test)]
    Fake(FakeTimeSource),

    #[cfg(test)]
    Mock(MockTimeSource),
}

impl TimeSourceFacade {
    pub(crate) fn real(kind: ClockKind) -> Self {
        match kind {
            ClockKind::Monotonic => MonotonicTimeSource::new().into(),
            ClockKind::WallClock => WallClockTimeSource.into(),
        }
    }
}

impl From<MonotonicTimeSource> for TimeSourceFacade {
    fn from(source: MonotonicTimeSource) -> Self {
        Self::Monotonic(source)
    }
}

impl From<WallClockTimeSource> for TimeSourceFacade {
    fn from(source: WallClockTimeSource) -> Self {
        Self::WallClock(source)
    }
}

#[cfg(test)]
impl From<FakeTimeSource> for TimeSourceFacade {
    fn from(source: FakeTimeSource) -> Self {
        Self::Fake(source)
    }
}

#[cfg(test)]
impl From<MockTimeSource> for TimeSourceFacade {
    fn from(source: MockTimeSource) -> Self {
        Self::Mock(source)
    }
}

impl TimeSource for TimeSourceFacade {
    #[inline]
    fn now_micros(&self) -> Result<u64> {
        match self {
            Self::Monotonic(source) => source.now_micros(),
            Self::WallClock(source) => source.now_micros(),
            #[cfg(test)]
            Self::Fake(source) => source.now_micros(),
            #[cfg(test)]
            Self::Mock(source) => source.now_micros(),
        }
    }
}

impl Debug for TimeSourceFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monotonic(source) => source.fmt(f),
            Self::WallClock(source) => source.fmt(f),
            #[cfg(test)]
            Self::Fake(source) => source.fmt(f),
            #[cfg(test)]
            Self::Mock(source) => source.fmt(f),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn real_selects_requested_clock() {
        assert!(matches!(
            TimeSourceFacade::real(ClockKind::Monotonic),
            TimeSourceFacade::Monotonic(_)
        ));
        assert!(matches!(
            TimeSourceFacade::real(ClockKind::WallClock),
            TimeSourceFacade::WallClock(_)
        ));
    }

    #[test]
    fn forwards_to_fake() {
        let fake = FakeTimeSource::new();
        fake.set(42);

        let facade = TimeSourceFacade::from(fake);

        assert_eq!(facade.now_micros().unwrap(), 42);
    }

    #[test]
    fn forwards_mock_failure() {
        let mut mock = MockTimeSource::new();
        mock.expect_now_micros().once().returning(|| {
            Err(Error::ClockFailure {
                problem: "unplugged".to_string(),
            })
        });

        let facade = TimeSourceFacade::from(mock);

        assert!(matches!(
            facade.now_micros(),
            Err(Error::ClockFailure { .. })
        ));
    }
}
