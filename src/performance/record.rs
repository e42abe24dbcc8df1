use serde::{Deserialize, Deserializer};
use std::time::{Duration, Instant};
use strum::{Display, EnumString};

/// Resolution a timer reports in, fixed when the timer starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TimeUnit {
    #[strum(to_string = "s", serialize = "sec", serialize = "seconds")]
    Seconds,
    #[default]
    #[strum(to_string = "ms", serialize = "milliseconds")]
    Milliseconds,
    #[strum(to_string = "µs", serialize = "us", serialize = "microseconds")]
    Microseconds,
    #[strum(to_string = "ns", serialize = "nanoseconds")]
    Nanoseconds,
}

impl TimeUnit {
    /// Whole units in `duration`, truncated towards zero.
    #[must_use]
    pub fn count(self, duration: Duration) -> u128 {
        match self {
            Self::Seconds => u128::from(duration.as_secs()),
            Self::Milliseconds => duration.as_millis(),
            Self::Microseconds => duration.as_micros(),
            Self::Nanoseconds => duration.as_nanos(),
        }
    }
}

impl<'de> Deserialize<'de> for TimeUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid time unit: {s}")))
    }
}

/// One tracked operation.
#[derive(Debug, Clone)]
pub struct TimerRecord {
    name: String,
    unit: TimeUnit,
    elapsed: Option<u128>,
    started: Instant,
}

impl TimerRecord {
    pub(crate) fn new(name: String, unit: TimeUnit, started: Instant) -> Self {
        Self {
            name,
            unit,
            elapsed: None,
            started,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Elapsed time in [`Self::unit`], `None` while still running.
    #[must_use]
    pub const fn elapsed(&self) -> Option<u128> {
        self.elapsed
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.elapsed.is_none()
    }

    /// Elapsed units between the start and `now`, `None` if `now` is earlier.
    pub(crate) fn measure(&self, now: Instant) -> Option<u128> {
        now.checked_duration_since(self.started)
            .map(|duration| self.unit.count(duration))
    }

    pub(crate) fn finish(&mut self, elapsed: u128) {
        self.elapsed = Some(elapsed);
    }
}
