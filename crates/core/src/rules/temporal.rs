//! Future-date and critical-window classification.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};

use super::CutoffSchedule;
use crate::types::HourMinute;

/// Date-only formats accepted for a scheduled date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Date-time formats accepted for a scheduled date; the time part is ignored.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A scheduled date that could not be read.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable scheduled date {0:?}")]
pub struct ScheduledDateError(pub String);

/// Parse a scheduled delivery or pickup date.
///
/// Accepts `YYYY-MM-DD` (what the checkout date pickers post), `DD/MM/YYYY`,
/// and date-times whose time part is discarded.
///
/// # Errors
///
/// Returns [`ScheduledDateError`] when no format matches.
pub fn parse_scheduled_date(raw: &str) -> Result<NaiveDate, ScheduledDateError> {
    let trimmed = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| ScheduledDateError(trimmed.to_owned()))
}

/// Whether a scheduled date is strictly after `today`.
///
/// Calendar dates only: a date-time later today is still today.
#[must_use]
pub fn is_future_date(scheduled: Option<NaiveDate>, today: NaiveDate) -> bool {
    scheduled.is_some_and(|date| date > today)
}

/// Result of temporal classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalFlags {
    pub scheduled_date: Option<NaiveDate>,
    pub is_future_date: bool,
    pub force_central: bool,
    pub weekday: Weekday,
    pub now: HourMinute,
    /// Present when a non-empty scheduled date could not be parsed.
    ///
    /// Classification still succeeds, treating the order as same-day.
    pub date_error: Option<ScheduledDateError>,
}

/// Classify an order against the clock.
///
/// `now` is store-local; its date is "today" and its weekday selects the
/// schedule row. `force_central` is only ever set for same-day orders.
#[must_use]
pub fn classify(
    now: NaiveDateTime,
    scheduled: Option<&str>,
    schedule: &CutoffSchedule,
) -> TemporalFlags {
    let (scheduled_date, date_error) = match scheduled.map(str::trim).filter(|s| !s.is_empty()) {
        None => (None, None),
        Some(raw) => match parse_scheduled_date(raw) {
            Ok(date) => (Some(date), None),
            Err(err) => (None, Some(err)),
        },
    };

    let is_future_date = is_future_date(scheduled_date, now.date());
    let weekday = now.weekday();
    let now_hm = HourMinute::from_time(now.time());
    let force_central = !is_future_date && schedule.in_critical_window(weekday, now_hm);

    TemporalFlags {
        scheduled_date,
        is_future_date,
        force_central,
        weekday,
        now: now_hm,
        date_error,
    }
}
