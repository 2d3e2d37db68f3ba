//! Date-only calendar arithmetic.
//!
//! Every date in the crate is a [`NaiveDate`]: a plain year/month/day value. Nothing
//! here goes through a timezone-aware timestamp, so a `YYYY-MM-DD` string always
//! lands on the same calendar day regardless of where the process runs.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

/// Builds the date for `day` in the given month, clamped to the month's last day.
///
/// Day 31 becomes 30 in April and 28/29 in February. Day 0 is treated as 1.
pub fn clamp_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

/// Moves a (year, month) pair by `delta` months, rolling the year over as needed.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// `None` when the result falls outside the calendar chrono can represent.
pub fn checked_add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Like [`checked_add_days`], keeping `date` unchanged on overflow.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    checked_add_days(date, days).unwrap_or(date)
}

/// Whole calendar months from the month of `from` to the month of `to`.
/// Negative when `to` lies in an earlier month.
pub fn month_span(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}

/// Parses a `YYYY-MM-DD` date. A full ISO timestamp is accepted by reading only
/// its leading date part, never by converting the instant.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// The inclusive `[current_date, forecast_end_date]` range a forecast runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastWindow {
    pub current_date: NaiveDate,
    pub forecast_end_date: NaiveDate,
}

impl ForecastWindow {
    pub fn new(current_date: NaiveDate, forecast_end_date: NaiveDate) -> Self {
        Self {
            current_date,
            forecast_end_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.current_date && date <= self.forecast_end_date
    }

    /// An end date before the current date yields an empty forecast rather than an error.
    pub fn is_degenerate(&self) -> bool {
        self.forecast_end_date < self.current_date
    }

    pub fn days(&self) -> i64 {
        (self.forecast_end_date - self.current_date).num_days()
    }
}
