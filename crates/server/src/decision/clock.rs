//! Store-local wall clock.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Source of the current store-local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// System time shifted into the stores' offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Stop at a store-local date-time.
    #[must_use]
    pub const fn new(local: NaiveDateTime) -> Self {
        Self(local)
    }

    /// Stop at an absolute instant, seen from the stores' offset.
    #[must_use]
    pub fn at<Tz: chrono::TimeZone>(instant: &DateTime<Tz>, offset: FixedOffset) -> Self {
        Self(instant.with_timezone(&offset).naive_local())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_converts_into_store_offset() {
        let instant = DateTime::parse_from_rfc3339("2026-10-20T22:00:00Z").unwrap();
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let clock = FixedClock::at(&instant, offset);
        assert_eq!(clock.now().to_string(), "2026-10-20 19:00:00");
    }

    #[test]
    fn test_system_clock_uses_offset() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let local = SystemClock::new(offset).now();
        let utc = Utc::now().naive_utc();
        let diff = (utc - local).num_minutes();
        assert!((179..=181).contains(&diff));
    }
}
