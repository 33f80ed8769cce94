//! Serial day numbers counted from the 1899-12-30 epoch.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Returns the serial-day epoch, 1899-12-30 00:00.
pub fn serial_epoch() -> NaiveDateTime {
    // Safety: a fixed, valid calendar date.
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("1899-12-30 is a valid date")
}

/// Converts a timestamp to fractional days since [`serial_epoch`].
pub fn to_serial_days(t: NaiveDateTime) -> f64 {
    (t - serial_epoch()).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Converts fractional days since [`serial_epoch`] back to a timestamp,
/// rounded to the nearest millisecond.
///
/// Returns `None` if the value is not finite or leaves chrono's range.
pub fn from_serial_days(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let millis = (days * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    serial_epoch().checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}
