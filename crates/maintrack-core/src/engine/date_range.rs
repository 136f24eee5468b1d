//! Creation-date windows relative to a reference instant.

use jiff::{civil::Date, Span, Timestamp, Zoned};

use crate::models::DateRange;

impl DateRange {
    /// Whether an order created at `created_at` falls inside this window.
    ///
    /// `Today` compares local calendar days. `ThisWeek` and `ThisMonth`
    /// compare instants against the start of the window, so an order created
    /// "in the future" relative to `now` still matches them.
    ///
    /// ```rust
    /// use jiff::{Timestamp, Zoned};
    /// use maintrack_core::models::DateRange;
    ///
    /// let now: Zoned = "2024-02-25T12:00:00[UTC]".parse().unwrap();
    /// let jan: Timestamp = "2024-01-15T09:00:00Z".parse().unwrap();
    /// let feb: Timestamp = "2024-02-01T09:00:00Z".parse().unwrap();
    ///
    /// assert!(DateRange::ThisMonth.contains(feb, &now));
    /// assert!(!DateRange::ThisMonth.contains(jan, &now));
    /// assert!(DateRange::All.contains(jan, &now));
    /// ```
    pub fn contains(&self, created_at: Timestamp, now: &Zoned) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => created_at.to_zoned(now.time_zone().clone()).date() == now.date(),
            DateRange::ThisWeek => created_at >= start_of_week(now),
            DateRange::ThisMonth => created_at >= start_of_month(now),
        }
    }
}

/// Local midnight of the most recent Sunday (today, if today is Sunday).
pub fn start_of_week(now: &Zoned) -> Timestamp {
    let today = now.date();
    let offset = today.weekday().to_sunday_zero_offset();
    let sunday = today
        .checked_sub(Span::new().days(offset))
        .unwrap_or(Date::MIN);
    local_midnight(sunday, now)
}

/// Local midnight of the first day of the current month.
pub fn start_of_month(now: &Zoned) -> Timestamp {
    local_midnight(now.date().first_of_month(), now)
}

fn local_midnight(date: Date, now: &Zoned) -> Timestamp {
    date.to_zoned(now.time_zone().clone())
        .map(|zoned| zoned.timestamp())
        .unwrap_or(Timestamp::MIN)
}

#[cfg(test)]
mod tests {
    use jiff::tz::{self, TimeZone};

    use super::*;
    use crate::fixtures::{now, ts};

    #[test]
    fn test_start_of_week_is_sunday_midnight() {
        // 2024-02-25 is a Sunday
        assert_eq!(
            start_of_week(&now("2024-02-25T12:00:00[UTC]")),
            ts("2024-02-25T00:00:00Z")
        );
        // Wednesday goes back to the previous Sunday
        assert_eq!(
            start_of_week(&now("2024-02-28T23:59:00[UTC]")),
            ts("2024-02-25T00:00:00Z")
        );
        // Saturday goes back six days, across a month boundary
        assert_eq!(
            start_of_week(&now("2024-03-02T08:00:00[UTC]")),
            ts("2024-02-25T00:00:00Z")
        );
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(
            start_of_month(&now("2024-02-25T12:00:00[UTC]")),
            ts("2024-02-01T00:00:00Z")
        );
    }

    #[test]
    fn test_today_uses_local_calendar_day() {
        // 23:30 UTC on the 24th is already the 25th at UTC+2
        let tz = TimeZone::fixed(tz::offset(2));
        let now = ts("2024-02-25T10:00:00Z").to_zoned(tz);
        let late_utc = ts("2024-02-24T23:30:00Z");

        assert!(DateRange::Today.contains(late_utc, &now));
        assert!(!DateRange::Today.contains(late_utc, &now_utc_same_instant(&now)));
    }

    #[test]
    fn test_week_and_month_compare_instants() {
        // One second before local midnight at UTC+2 is outside the week, the
        // instant of midnight itself is inside it
        let tz = TimeZone::fixed(tz::offset(2));
        let now = ts("2024-02-27T10:00:00Z").to_zoned(tz);
        let boundary = ts("2024-02-24T22:00:00Z");

        assert!(DateRange::ThisWeek.contains(boundary, &now));
        assert!(!DateRange::ThisWeek.contains(ts("2024-02-24T21:59:59Z"), &now));
        assert!(DateRange::ThisMonth.contains(ts("2024-01-31T22:00:00Z"), &now));
        assert!(!DateRange::ThisMonth.contains(ts("2024-01-31T21:59:59Z"), &now));
    }

    fn now_utc_same_instant(now: &Zoned) -> Zoned {
        now.timestamp().to_zoned(TimeZone::UTC)
    }
}
