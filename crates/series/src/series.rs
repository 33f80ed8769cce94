//! Timestamped sample sequences and their preconditions.

use chrono::NaiveDateTime;

use crate::error::SeriesError;

/// Minimum number of samples a usable series must hold.
pub const MIN_SAMPLES: usize = 3;

/// One timestamped value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Instant the value applies to.
    pub time: NaiveDateTime,
    /// Observed value in the series' own units.
    pub value: f64,
}

impl Sample {
    /// Creates a sample.
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// How much of the simulation horizon a series must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlap {
    /// At least one instant in common with the horizon (rainfall).
    #[default]
    Partial,
    /// Starts at or before the horizon and ends at or after it (temperature).
    Full,
}

/// A named, user-entered time series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Creates a named series. No validation happens here; see
    /// [`validate`](Self::validate).
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Returns the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the samples in stored order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Checks the preconditions for conforming this series onto the
    /// horizon `[start, end]`.
    ///
    /// # Errors
    ///
    /// In order of checking:
    /// - [`SeriesError::TooFewSamples`] with fewer than [`MIN_SAMPLES`] samples
    /// - [`SeriesError::NoOverlap`] / [`SeriesError::IncompleteOverlap`]
    ///   when the required `overlap` is not met
    /// - [`SeriesError::OutOfOrder`] when timestamps are not strictly
    ///   increasing
    /// - [`SeriesError::NonFinite`] for NaN or infinite values
    pub fn validate(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        overlap: Overlap,
    ) -> Result<(), SeriesError> {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(f), Some(l)) if self.samples.len() >= MIN_SAMPLES => (f.time, l.time),
            _ => {
                return Err(SeriesError::TooFewSamples {
                    name: self.name.clone(),
                    got: self.samples.len(),
                    min: MIN_SAMPLES,
                });
            }
        };

        match overlap {
            Overlap::Partial => {
                if start > last || end < first {
                    return Err(SeriesError::NoOverlap {
                        name: self.name.clone(),
                    });
                }
            }
            Overlap::Full => {
                if first > start || last < end {
                    return Err(SeriesError::IncompleteOverlap {
                        name: self.name.clone(),
                    });
                }
            }
        }

        if let Some(index) = self
            .samples
            .windows(2)
            .position(|w| w[1].time <= w[0].time)
        {
            return Err(SeriesError::OutOfOrder {
                name: self.name.clone(),
                index: index + 1,
            });
        }

        if let Some(index) = self.samples.iter().position(|s| !s.value.is_finite()) {
            return Err(SeriesError::NonFinite {
                name: self.name.clone(),
                index,
            });
        }

        Ok(())
    }
}
