//! Wall-clock time of day at minute resolution.

use core::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing an [`HourMinute`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HourMinuteError {
    /// Input is not in `HH:MM` form.
    #[error("expected HH:MM, got {0:?}")]
    Format(String),
    /// Hour or minute out of range.
    #[error("time out of range: {0:?}")]
    OutOfRange(String),
}

/// A local time of day, `HH:MM`.
///
/// Ordering is numeric on minutes since midnight, which is the same order
/// as comparing zero-padded `"HH:MM"` strings. Seconds never participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourMinute(u16);

impl HourMinute {
    /// Create from hour and minute.
    ///
    /// Out-of-range components are clamped to `23:59`.
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Self {
        let hour = if hour > 23 { 23 } else { hour };
        let minute = if minute > 59 { 59 } else { minute };
        Self(hour as u16 * 60 + minute as u16)
    }

    /// Truncate a time to the minute.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // hour() < 24 and minute() < 60
    pub fn from_time(time: NaiveTime) -> Self {
        Self::new(time.hour() as u8, time.minute() as u8)
    }

    /// Parse `HH:MM` (a single-digit hour is accepted).
    ///
    /// # Errors
    ///
    /// Returns [`HourMinuteError`] for malformed or out-of-range input.
    pub fn parse(s: &str) -> Result<Self, HourMinuteError> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| HourMinuteError::Format(s.to_owned()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| HourMinuteError::Format(s.to_owned()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| HourMinuteError::Format(s.to_owned()))?;
        if hour > 23 || minute > 59 || minute_digits(s) != 2 {
            return Err(HourMinuteError::OutOfRange(s.to_owned()));
        }
        Ok(Self::new(hour, minute))
    }

    /// Hour component.
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component.
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

fn minute_digits(s: &str) -> usize {
    s.trim().split_once(':').map_or(0, |(_, m)| m.len())
}

impl fmt::Display for HourMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for HourMinute {
    type Err = HourMinuteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HourMinute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HourMinute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
