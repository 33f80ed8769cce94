//! Gregorian month lengths and mid-month centre days.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 = January).
const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns `true` for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Returns the number of days in `month` of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    if month == 2 && is_leap_year(year) {
        return Ok(29);
    }
    Ok(DAYS_PER_MONTH[(month - 1) as usize])
}

/// Returns the centre day of a month: the ceiling of half its length.
///
/// January (31 days) centres on day 16, April (30 days) on day 15 and a
/// leap February on day 15.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn center_day(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(days_in_month(year, month)?.div_ceil(2))
}

/// Returns the `(year, month)` preceding the given month, wrapping January
/// into December of the previous year.
pub(crate) fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Returns the `(year, month)` following the given month, wrapping December
/// into January of the next year.
pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Returns the `(year, month)` of a date.
pub(crate) fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
