//! Error types for the amm-series crate.

/// Error type for all fallible operations in the amm-series crate.
///
/// Every variant names the offending series or gage so a failed run can be
/// traced back to its input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a series holds too few samples to be usable.
    #[error(
        "time series \"{name}\": {got} sample(s), need at least {min}; \
         only user-entered time series data is supported"
    )]
    TooFewSamples {
        /// Name of the series.
        name: String,
        /// Number of samples present.
        got: usize,
        /// Minimum number required.
        min: usize,
    },

    /// Returned when a series does not overlap the simulation period at all.
    #[error("time series \"{name}\" does not overlap the simulation period")]
    NoOverlap {
        /// Name of the series.
        name: String,
    },

    /// Returned when a series that must cover the whole horizon does not.
    #[error("time series \"{name}\" does not fully cover the simulation period")]
    IncompleteOverlap {
        /// Name of the series.
        name: String,
    },

    /// Returned when sample timestamps are not strictly increasing.
    #[error("time series \"{name}\" is out of order at sample {index}")]
    OutOfOrder {
        /// Name of the series.
        name: String,
        /// Index of the first sample not later than its predecessor.
        index: usize,
    },

    /// Returned when a sample value is NaN or infinite.
    #[error("time series \"{name}\" has a non-finite value at sample {index}")]
    NonFinite {
        /// Name of the series.
        name: String,
        /// Index of the offending sample.
        index: usize,
    },

    /// Returned when a rain gage reads from anything but a direct series.
    #[error("rain gage \"{name}\": data source {kind} is not supported, use TIMESERIES")]
    UnsupportedSource {
        /// Name of the rain gage.
        name: String,
        /// The rejected source kind.
        kind: String,
    },

    /// Returned when a rain gage recording interval is not positive.
    #[error("rain gage \"{name}\": invalid recording interval {minutes} minutes")]
    InvalidInterval {
        /// Name of the rain gage.
        name: String,
        /// The rejected interval, in minutes.
        minutes: f64,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] amm_calendar::CalendarError),
}
