//! Rain gage input and its conversion to per-step depths.
//!
//! Gages record rainfall in one of three conventions. All three are first
//! turned into a cumulative depth curve, then conformed onto the step
//! boundaries of the horizon and differenced, so the step depth at `t` is
//! the rain that fell during `(t - step, t]`.

use std::fmt;
use std::path::PathBuf;

use chrono::TimeDelta;
use tracing::debug;

use amm_calendar::SimulationClock;

use crate::conform::conform;
use crate::error::SeriesError;
use crate::series::{Overlap, Sample, TimeSeries};

/// Gaps larger than this many intervals count as dry periods.
const DRY_GAP_INTERVALS: f64 = 1.5;

/// Convention a rain gage records its values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RainFormat {
    /// Depth per hour, averaged over each recording interval.
    #[default]
    Intensity,
    /// Depth that fell during each recording interval.
    Volume,
    /// Running total depth since the start of the record.
    Cumulative,
}

impl fmt::Display for RainFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intensity => f.write_str("INTENSITY"),
            Self::Volume => f.write_str("VOLUME"),
            Self::Cumulative => f.write_str("CUMULATIVE"),
        }
    }
}

/// Where a rain gage reads its record from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A series entered directly in the run configuration.
    TimeSeries,
    /// An external rainfall file. Not supported.
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeSeries => f.write_str("TIMESERIES"),
            Self::File(_) => f.write_str("FILE"),
        }
    }
}

/// A rain gage: a rainfall record plus how to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct RainGage {
    name: String,
    source: DataSource,
    format: RainFormat,
    interval_minutes: f64,
    series: TimeSeries,
}

impl RainGage {
    /// Creates a gage reading `series` directly.
    pub fn new(
        name: impl Into<String>,
        format: RainFormat,
        interval_minutes: f64,
        series: TimeSeries,
    ) -> Self {
        Self {
            name: name.into(),
            source: DataSource::TimeSeries,
            format,
            interval_minutes,
            series,
        }
    }

    /// Replaces the data source.
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// Returns the gage name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Returns the recording convention.
    pub fn format(&self) -> RainFormat {
        self.format
    }

    /// Returns the recording interval in minutes.
    pub fn interval_minutes(&self) -> f64 {
        self.interval_minutes
    }

    /// Returns the underlying series.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }
}

/// Turns raw gage samples into a cumulative depth curve, in metres when
/// `depth_to_m` converts the gage's depth unit to metres.
///
/// For [`RainFormat::Cumulative`] the samples are scaled in place. For the
/// per-interval conventions the curve starts at zero at the first sample
/// and each sample's depth is credited at the end of its interval. Where
/// consecutive samples are more than 1.5 intervals apart a flat point is
/// inserted at the later sample's time, so no rain is smeared across the
/// dry gap.
pub fn to_cumulative(
    samples: &[Sample],
    format: RainFormat,
    interval_minutes: f64,
    depth_to_m: f64,
) -> Vec<Sample> {
    if format == RainFormat::Cumulative {
        return samples
            .iter()
            .map(|s| Sample::new(s.time, s.value * depth_to_m))
            .collect();
    }

    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let interval = TimeDelta::milliseconds((interval_minutes * 60_000.0).round() as i64);
    let dry_gap = TimeDelta::milliseconds(
        (interval_minutes * 60_000.0 * DRY_GAP_INTERVALS).round() as i64,
    );

    let mut curve = Vec::with_capacity(samples.len() * 2 + 1);
    curve.push(Sample::new(first.time, 0.0));
    let mut total = 0.0;
    let mut previous = None;
    for s in samples {
        if let Some(prev) = previous
            && s.time - prev > dry_gap
        {
            curve.push(Sample::new(s.time, total));
        }
        total += match format {
            RainFormat::Intensity => s.value * interval_minutes / 60.0 * depth_to_m,
            _ => s.value * depth_to_m,
        };
        curve.push(Sample::new(s.time + interval, total));
        previous = Some(s.time);
    }
    curve
}

/// Produces one rain depth per step of `clock`, in metres.
///
/// # Errors
///
/// - [`SeriesError::UnsupportedSource`] when the gage reads from a file
/// - [`SeriesError::InvalidInterval`] when the recording interval is not
///   positive
/// - any validation error from [`TimeSeries::validate`] with
///   [`Overlap::Partial`]
pub fn conform_rainfall(
    gage: &RainGage,
    clock: &SimulationClock,
    depth_to_m: f64,
) -> Result<Vec<f64>, SeriesError> {
    if gage.source != DataSource::TimeSeries {
        return Err(SeriesError::UnsupportedSource {
            name: gage.name.clone(),
            kind: gage.source.to_string(),
        });
    }
    if !(gage.interval_minutes.is_finite() && gage.interval_minutes > 0.0) {
        return Err(SeriesError::InvalidInterval {
            name: gage.name.clone(),
            minutes: gage.interval_minutes,
        });
    }
    gage.series
        .validate(clock.start(), clock.end(), Overlap::Partial)?;

    let curve = to_cumulative(
        gage.series.samples(),
        gage.format,
        gage.interval_minutes,
        depth_to_m,
    );
    let boundaries = clock.instants_with_leading_step()?;
    let cumulative = conform(&curve, &boundaries);
    let depths: Vec<f64> = cumulative
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .collect();

    debug!(
        gage = %gage.name,
        format = %gage.format,
        samples = gage.series.len(),
        steps = depths.len(),
        total_m = depths.iter().sum::<f64>(),
        "conformed rainfall"
    );
    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn display_formats() {
        assert_eq!(RainFormat::Intensity.to_string(), "INTENSITY");
        assert_eq!(RainFormat::Volume.to_string(), "VOLUME");
        assert_eq!(RainFormat::Cumulative.to_string(), "CUMULATIVE");
        assert_eq!(DataSource::TimeSeries.to_string(), "TIMESERIES");
        assert_eq!(DataSource::File(PathBuf::from("x.dat")).to_string(), "FILE");
    }

    #[test]
    fn volume_curve_credits_end_of_interval() {
        let s = [
            Sample::new(t(0, 0), 2.0),
            Sample::new(t(1, 0), 3.0),
            Sample::new(t(2, 0), 0.0),
        ];
        let curve = to_cumulative(&s, RainFormat::Volume, 60.0, 1.0);
        let values: Vec<f64> = curve.iter().map(|p| p.value).collect();
        let times: Vec<NaiveDateTime> = curve.iter().map(|p| p.time).collect();
        assert_eq!(values, vec![0.0, 2.0, 5.0, 5.0]);
        assert_eq!(times, vec![t(0, 0), t(1, 0), t(2, 0), t(3, 0)]);
    }

    #[test]
    fn intensity_scales_by_interval() {
        let s = [Sample::new(t(0, 0), 12.0)];
        let curve = to_cumulative(&s, RainFormat::Intensity, 15.0, 0.001);
        assert_relative_eq!(curve[1].value, 0.003, epsilon = 1e-15);
    }

    #[test]
    fn dry_gap_inserts_flat_point() {
        let s = [Sample::new(t(0, 0), 1.0), Sample::new(t(5, 0), 1.0)];
        let curve = to_cumulative(&s, RainFormat::Volume, 60.0, 1.0);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[2], Sample::new(t(5, 0), 1.0));
        assert_eq!(curve[3], Sample::new(t(6, 0), 2.0));
    }

    #[test]
    fn cumulative_passthrough_scaled() {
        let s = [Sample::new(t(0, 0), 0.0), Sample::new(t(1, 0), 25.4)];
        let curve = to_cumulative(&s, RainFormat::Cumulative, 60.0, 0.0254);
        assert_eq!(curve.len(), 2);
        assert_relative_eq!(curve[1].value, 0.64516, epsilon = 1e-12);
    }

    #[test]
    fn file_source_rejected() {
        let series = TimeSeries::new("R", vec![]);
        let gage = RainGage::new("G", RainFormat::Volume, 60.0, series)
            .with_source(DataSource::File(PathBuf::from("rain.dat")));
        let clock = SimulationClock::new(t(0, 0), t(3, 0), 60.0).unwrap();
        let err = conform_rainfall(&gage, &clock, 1.0).unwrap_err();
        assert!(matches!(err, SeriesError::UnsupportedSource { .. }));
    }

    #[test]
    fn zero_interval_rejected() {
        let series = TimeSeries::new("R", vec![]);
        let gage = RainGage::new("G", RainFormat::Volume, 0.0, series);
        let clock = SimulationClock::new(t(0, 0), t(3, 0), 60.0).unwrap();
        assert!(matches!(
            conform_rainfall(&gage, &clock, 1.0),
            Err(SeriesError::InvalidInterval { .. })
        ));
    }
}
