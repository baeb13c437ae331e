//! Same-day cutoff and closing times per weekday.

use chrono::Weekday;

use crate::types::HourMinute;

/// Per-weekday schedule for physical stores and Central.
///
/// Physical stores share one cutoff: the latest local time they can still
/// take a same-day order. Central has its own, later, closing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoffSchedule {
    /// Indexed Monday = 0 .. Sunday = 6.
    store_cutoff: [HourMinute; 7],
    central_close: [HourMinute; 7],
}

impl CutoffSchedule {
    /// Create a schedule from Monday-first arrays.
    #[must_use]
    pub const fn new(store_cutoff: [HourMinute; 7], central_close: [HourMinute; 7]) -> Self {
        Self {
            store_cutoff,
            central_close,
        }
    }

    /// Physical store cutoff for a weekday.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // num_days_from_monday() is 0..7
    pub fn store_cutoff(&self, weekday: Weekday) -> HourMinute {
        self.store_cutoff[weekday.num_days_from_monday() as usize]
    }

    /// Central closing time for a weekday.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // num_days_from_monday() is 0..7
    pub fn central_close(&self, weekday: Weekday) -> HourMinute {
        self.central_close[weekday.num_days_from_monday() as usize]
    }

    /// Whether `now` is past the store cutoff but not past Central's close.
    ///
    /// The cutoff minute itself still belongs to the store; the closing
    /// minute still belongs to Central.
    #[must_use]
    pub fn in_critical_window(&self, weekday: Weekday, now: HourMinute) -> bool {
        now > self.store_cutoff(weekday) && now <= self.central_close(weekday)
    }
}

impl Default for CutoffSchedule {
    fn default() -> Self {
        const WEEKDAY_CUTOFF: HourMinute = HourMinute::new(18, 45);
        const CENTRAL_CLOSE: HourMinute = HourMinute::new(20, 0);

        Self::new(
            [
                WEEKDAY_CUTOFF,
                WEEKDAY_CUTOFF,
                WEEKDAY_CUTOFF,
                WEEKDAY_CUTOFF,
                WEEKDAY_CUTOFF,
                HourMinute::new(17, 45),
                HourMinute::new(13, 45),
            ],
            [
                CENTRAL_CLOSE,
                CENTRAL_CLOSE,
                CENTRAL_CLOSE,
                CENTRAL_CLOSE,
                CENTRAL_CLOSE,
                CENTRAL_CLOSE,
                HourMinute::new(16, 0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs() {
        let schedule = CutoffSchedule::default();
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            assert_eq!(schedule.store_cutoff(day).to_string(), "18:45");
            assert_eq!(schedule.central_close(day).to_string(), "20:00");
        }
        assert_eq!(schedule.store_cutoff(Weekday::Sat).to_string(), "17:45");
        assert_eq!(schedule.central_close(Weekday::Sat).to_string(), "20:00");
        assert_eq!(schedule.store_cutoff(Weekday::Sun).to_string(), "13:45");
        assert_eq!(schedule.central_close(Weekday::Sun).to_string(), "16:00");
    }

    #[test]
    fn test_critical_window_boundaries() {
        let schedule = CutoffSchedule::default();
        let at = |h, m| HourMinute::new(h, m);

        assert!(!schedule.in_critical_window(Weekday::Mon, at(18, 45)));
        assert!(schedule.in_critical_window(Weekday::Mon, at(18, 46)));
        assert!(schedule.in_critical_window(Weekday::Mon, at(20, 0)));
        assert!(!schedule.in_critical_window(Weekday::Mon, at(20, 1)));
        assert!(schedule.in_critical_window(Weekday::Sat, at(18, 0)));
    }
}
