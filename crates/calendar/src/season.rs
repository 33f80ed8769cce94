//! Spring/fall season switch for the cold seasonal parameters.

use chrono::{Datelike, NaiveDate};

/// Half of the year governing which cold seasonal parameters apply.
///
/// Spring runs from January 1 through July 15 and fall from July 16
/// through December 31. The switch is a hard calendar boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// January 1 to July 15 inclusive.
    Spring,
    /// July 16 to December 31 inclusive.
    Fall,
}

impl Season {
    /// Returns the season containing `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use amm_calendar::Season;
    /// use chrono::NaiveDate;
    ///
    /// let d = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();
    /// assert_eq!(Season::of(d), Season::Spring);
    /// let d = NaiveDate::from_ymd_opt(2021, 7, 16).unwrap();
    /// assert_eq!(Season::of(d), Season::Fall);
    /// ```
    pub fn of(date: NaiveDate) -> Self {
        let (month, day) = (date.month(), date.day());
        if month < 7 || (month == 7 && day <= 15) {
            Self::Spring
        } else {
            Self::Fall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, d).unwrap()
    }

    #[test]
    fn new_year_is_spring() {
        assert_eq!(Season::of(date(1, 1)), Season::Spring);
    }

    #[test]
    fn july_boundary() {
        assert_eq!(Season::of(date(7, 15)), Season::Spring);
        assert_eq!(Season::of(date(7, 16)), Season::Fall);
    }

    #[test]
    fn new_years_eve_is_fall() {
        assert_eq!(Season::of(date(12, 31)), Season::Fall);
    }

    #[test]
    fn june_is_spring_august_is_fall() {
        assert_eq!(Season::of(date(6, 30)), Season::Spring);
        assert_eq!(Season::of(date(8, 1)), Season::Fall);
    }
}
