//! Daily temperature estimates from twelve monthly averages.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::month::{center_day, days_in_month, next_month, previous_month, year_month};

/// Twelve monthly average temperatures interpolated mid-month to mid-month.
///
/// Each month's average is pinned to its centre day (see
/// [`center_day`](crate::center_day)); dates in between blend linearly
/// between the two governing months, wrapping across the year boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalTemperature {
    monthly: [f64; 12],
}

impl SeasonalTemperature {
    /// Creates an interpolator from January..December averages.
    pub fn new(monthly: [f64; 12]) -> Self {
        Self { monthly }
    }

    /// Returns the monthly averages, January first.
    pub fn monthly(&self) -> &[f64; 12] {
        &self.monthly
    }

    fn average(&self, month: u32) -> f64 {
        self.monthly[(month - 1) as usize]
    }

    /// Estimates the temperature on `date`.
    ///
    /// Before the month's centre day the estimate blends the previous and
    /// current months; from the centre day on it blends the current and
    /// next months. The fraction is the day offset from the earlier centre
    /// divided by the day span between the two centres.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] only if chrono reports an
    /// impossible month, which does not happen for valid dates.
    pub fn interpolate(&self, date: NaiveDate) -> Result<f64, CalendarError> {
        let (year, month) = year_month(date);
        let day = date.day();
        let center = center_day(year, month)?;

        let ((from_year, from_month), (to_year, to_month)) = if day < center {
            (previous_month(year, month), (year, month))
        } else {
            ((year, month), next_month(year, month))
        };

        let from_half = days_in_month(from_year, from_month)? / 2;
        let to_center = center_day(to_year, to_month)?;
        let span = from_half + to_center;

        let offset = if day < center {
            day + from_half
        } else {
            day - center
        };

        let frac = f64::from(offset) / f64::from(span);
        Ok(frac * self.average(to_month) + (1.0 - frac) * self.average(from_month))
    }
}

impl Default for SeasonalTemperature {
    /// Monthly averages in degrees Fahrenheit for a northern temperate
    /// climate.
    fn default() -> Self {
        Self::new([
            23.4, 27.1, 39.0, 49.9, 61.3, 70.3, 73.1, 71.5, 65.7, 53.4, 40.3, 30.1,
        ])
    }
}
