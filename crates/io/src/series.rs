//! Series descriptions shared by the writer and the reader.

use amm_calendar::from_serial_days;
use chrono::NaiveDateTime;

/// The four label strings stored in the footer for each series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesLabels {
    category: String,
    function: String,
    unit: String,
    location: String,
}

impl SeriesLabels {
    /// Creates a label set.
    pub fn new(
        category: impl Into<String>,
        function: impl Into<String>,
        unit: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            function: function.into(),
            unit: unit.into(),
            location: location.into(),
        }
    }

    /// Returns the category, e.g. `AMM Subcatchments`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the function name, e.g. `Runoff`.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the unit label.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the location name.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub(crate) fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("category", &self.category),
            ("function", &self.function),
            ("unit", &self.unit),
            ("location", &self.location),
        ]
    }
}

/// Borrowed view over one fixed-step series to be written.
///
/// Values are held as `f64` and narrowed to `f32` on write.
#[derive(Debug, Clone)]
pub struct SeriesBlock<'a> {
    labels: SeriesLabels,
    start: NaiveDateTime,
    step_seconds: f64,
    values: &'a [f64],
}

impl<'a> SeriesBlock<'a> {
    /// Creates a block whose first value belongs to `start` and whose
    /// samples are `step_seconds` apart.
    pub fn new(
        labels: SeriesLabels,
        start: NaiveDateTime,
        step_seconds: f64,
        values: &'a [f64],
    ) -> Self {
        Self {
            labels,
            start,
            step_seconds,
            values,
        }
    }

    /// Returns the labels.
    pub fn labels(&self) -> &SeriesLabels {
        &self.labels
    }

    /// Returns the time of the first value.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the sample spacing in seconds.
    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Returns the values.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the block has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One series decoded from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSeries {
    pub(crate) labels: SeriesLabels,
    pub(crate) offset: u64,
    pub(crate) start_days: f64,
    pub(crate) interval: f64,
    pub(crate) values: Vec<f32>,
}

impl StoredSeries {
    /// Returns the labels.
    pub fn labels(&self) -> &SeriesLabels {
        &self.labels
    }

    /// Returns the byte offset of the data block, as stored in the footer.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the stored start time in days since 1899-12-30.
    pub fn start_days(&self) -> f64 {
        self.start_days
    }

    /// Returns the stored start time, or `None` if it is out of range.
    pub fn start(&self) -> Option<NaiveDateTime> {
        from_serial_days(self.start_days)
    }

    /// Returns the raw interval field. Files written by this crate hold
    /// the step in seconds here, while the start field holds days.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Returns the values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
