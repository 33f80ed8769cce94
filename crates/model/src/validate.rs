//! Accumulated validation for subcatchment records.
//!
//! A record can be wrong in many fields at once. [`ValidationCollector`]
//! gathers every violation so a single error reports all of them.

use crate::error::ModelError;

/// Accumulates validation errors and converts them into a single
/// [`ModelError::InvalidParameters`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Record `msg` unless `value` is zero or positive.
    pub(crate) fn non_negative(&mut self, field: &str, value: f64) {
        if value < 0.0 {
            self.push(format!("{field} may not be negative"));
        }
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(ModelError::InvalidParameters { .. })` for subcatchment `name`.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self, name: &str) -> Result<(), ModelError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ModelError::InvalidParameters {
                name: name.to_string(),
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
