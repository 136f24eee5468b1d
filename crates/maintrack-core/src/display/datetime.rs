//! DateTime display utilities.
//!
//! Wrapper types for formatting timestamps in the system time zone, either
//! compactly for terminal output or long-form for exported reports.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Long-form report timestamp, e.g. `Feb 25, 2024, 9:30:00 AM`.
///
/// The time zone is explicit so reports are reproducible.
///
/// ```rust
/// use jiff::{tz::TimeZone, Timestamp};
/// use maintrack_core::display::ReportDateTime;
///
/// let ts: Timestamp = "2024-02-25T09:30:00Z".parse().unwrap();
/// let text = ReportDateTime::new(&ts, &TimeZone::UTC).to_string();
/// assert_eq!(text, "Feb 25, 2024, 9:30:00 AM");
/// ```
pub struct ReportDateTime<'a> {
    timestamp: &'a Timestamp,
    zone: &'a TimeZone,
}

impl<'a> ReportDateTime<'a> {
    pub fn new(timestamp: &'a Timestamp, zone: &'a TimeZone) -> Self {
        Self { timestamp, zone }
    }
}

impl<'a> fmt::Display for ReportDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.timestamp
                .to_zoned(self.zone.clone())
                .strftime("%b %-d, %Y, %-I:%M:%S %p")
        )
    }
}
