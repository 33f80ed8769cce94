//! Air temperature input: a direct series or the monthly climatology.

use chrono::NaiveDateTime;

use amm_calendar::{SeasonalTemperature, SimulationClock};

use crate::conform::conform;
use crate::error::SeriesError;
use crate::series::{Overlap, TimeSeries};

/// Source of air temperatures for a run.
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureSource {
    /// Smoothly interpolated monthly averages.
    Seasonal(SeasonalTemperature),
    /// A user series that must cover the whole horizon.
    Series(TimeSeries),
}

impl Default for TemperatureSource {
    fn default() -> Self {
        Self::Seasonal(SeasonalTemperature::default())
    }
}

impl TemperatureSource {
    /// Checks that this source can supply every step of `clock`.
    ///
    /// Monthly climatology always can.
    ///
    /// # Errors
    ///
    /// Any error from [`TimeSeries::validate`] with [`Overlap::Full`].
    pub fn validate_for(&self, clock: &SimulationClock) -> Result<(), SeriesError> {
        match self {
            Self::Seasonal(_) => Ok(()),
            Self::Series(series) => series.validate(clock.start(), clock.end(), Overlap::Full),
        }
    }

    /// Returns one temperature per instant in `times` (ascending).
    ///
    /// Series sources are conformed without re-validation, so instants
    /// before the record read as zero and instants after it hold the last
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Calendar`] if a date falls outside the
    /// supported calendar range.
    pub fn at(&self, times: &[NaiveDateTime]) -> Result<Vec<f64>, SeriesError> {
        match self {
            Self::Seasonal(table) => times
                .iter()
                .map(|t| table.interpolate(t.date()).map_err(SeriesError::from))
                .collect(),
            Self::Series(series) => Ok(conform(series.samples(), times)),
        }
    }

    /// Returns one temperature per step of `clock`, after checking coverage.
    ///
    /// # Errors
    ///
    /// See [`validate_for`](Self::validate_for) and [`at`](Self::at).
    pub fn horizon(&self, clock: &SimulationClock) -> Result<Vec<f64>, SeriesError> {
        self.validate_for(clock)?;
        self.at(&clock.instants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn t(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn seasonal_always_valid() {
        let clock = SimulationClock::new(t(1, 0), t(3, 0), 60.0).unwrap();
        let src = TemperatureSource::default();
        assert!(src.validate_for(&clock).is_ok());
        assert_eq!(src.horizon(&clock).unwrap().len(), clock.len());
    }

    #[test]
    fn seasonal_constant_table() {
        let src = TemperatureSource::Seasonal(SeasonalTemperature::new([55.0; 12]));
        let out = src.at(&[t(1, 0), t(20, 12)]).unwrap();
        assert_relative_eq!(out[0], 55.0, epsilon = 1e-9);
        assert_relative_eq!(out[1], 55.0, epsilon = 1e-9);
    }

    #[test]
    fn series_must_cover_horizon() {
        let series = TimeSeries::new(
            "T",
            vec![
                Sample::new(t(1, 6), 40.0),
                Sample::new(t(2, 0), 50.0),
                Sample::new(t(4, 0), 60.0),
            ],
        );
        let src = TemperatureSource::Series(series);
        let clock = SimulationClock::new(t(1, 0), t(3, 0), 60.0).unwrap();
        assert!(matches!(
            src.horizon(&clock),
            Err(SeriesError::IncompleteOverlap { .. })
        ));
    }

    #[test]
    fn series_conformed_to_steps() {
        let series = TimeSeries::new(
            "T",
            vec![
                Sample::new(t(1, 0), 40.0),
                Sample::new(t(1, 4), 48.0),
                Sample::new(t(2, 0), 50.0),
            ],
        );
        let src = TemperatureSource::Series(series);
        let clock = SimulationClock::new(t(1, 0), t(1, 4), 60.0).unwrap();
        let out = src.horizon(&clock).unwrap();
        assert_eq!(out.len(), 5);
        assert_relative_eq!(out[1], 42.0, epsilon = 1e-12);
        assert_relative_eq!(out[4], 48.0, epsilon = 1e-12);
    }
}
