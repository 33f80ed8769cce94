//! Error types for the amm-calendar crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the amm-calendar crate.
///
/// Covers invalid month numbers, malformed simulation horizons and step
/// sizes, and dates that fall outside chrono's representable range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a simulation step is zero, negative or not finite.
    #[error("invalid time step: {minutes} minutes (must be positive)")]
    InvalidStep {
        /// The step length that was provided, in minutes.
        minutes: f64,
    },

    /// Returned when the simulation end precedes its start.
    #[error("simulation end {end} precedes start {start}")]
    InvalidHorizon {
        /// Requested start of the horizon.
        start: NaiveDateTime,
        /// Requested end of the horizon.
        end: NaiveDateTime,
    },

    /// Returned when date arithmetic leaves chrono's supported range.
    #[error("date out of range: {reason}")]
    OutOfRange {
        /// Description of the failing computation.
        reason: String,
    },
}
