use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::pal::TimeSource;
use crate::{Error, Result};

/// Wall clock time source measuring microseconds since the Unix epoch.
///
/// This follows system clock adjustments, so consecutive readings may go backwards.
#[derive(Clone, Debug)]
pub(crate) struct WallClockTimeSource;

impl TimeSource for WallClockTimeSource {
    fn now_micros(&self) -> Result<u64> {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|e| {
            warn!(error = %e, "system clock is set before the Unix epoch");

            Error::ClockFailure {
                problem: e.to_string(),
            }
        })?;

        let micros = since_epoch.as_micros();

        u64::try_from(micros).map_err(|_| {
            warn!(micros = %micros, "system clock exceeded the u64 microsecond range");

            Error::ClockFailure {
                problem: format!("{micros} microseconds since the Unix epoch does not fit in u64"),
            }
        })
    }
}
