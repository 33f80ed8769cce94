//! Error types for the amm-model crate.

/// Error type for all fallible operations in the amm-model crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// One or more parameter checks failed for a subcatchment.
    #[error("subcatchment \"{name}\": {count} invalid parameter(s): {details}")]
    InvalidParameters {
        /// Subcatchment name.
        name: String,
        /// Number of individual violations.
        count: usize,
        /// Semicolon-separated list of violation messages.
        details: String,
    },

    /// A subcatchment record has no name.
    #[error("all AMM subcatchments must have names (record {index})")]
    MissingName {
        /// Zero-based position of the record in the input.
        index: usize,
    },

    /// Two subcatchment records share a name.
    #[error("duplicate subcatchment name \"{name}\"")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A flow unit name was not recognised.
    #[error("unknown flow unit \"{unit}\" (expected CMS, LPS, MLD, CFS, GPM or MGD)")]
    UnknownFlowUnit {
        /// The rejected unit name.
        unit: String,
    },

    /// A rain gage referenced by a subcatchment was not supplied to the run.
    #[error("subcatchment \"{name}\": unknown rain gage \"{gage}\"")]
    UnknownGage {
        /// Subcatchment name.
        name: String,
        /// The missing gage name.
        gage: String,
    },

    /// Input series handed to the simulator have the wrong length.
    #[error("subcatchment \"{name}\": {input} input has {got} values, expected {expected}")]
    InputLength {
        /// Subcatchment name.
        name: String,
        /// Which input (`rain` or `temperature`).
        input: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Time series error.
    #[error(transparent)]
    Series(#[from] amm_series::SeriesError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] amm_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_parameters() {
        let e = ModelError::InvalidParameters {
            name: "S1".to_string(),
            count: 2,
            details: "Area must be positive; RDFast may not be negative".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "subcatchment \"S1\": 2 invalid parameter(s): \
             Area must be positive; RDFast may not be negative"
        );
    }

    #[test]
    fn display_missing_name() {
        let e = ModelError::MissingName { index: 3 };
        assert_eq!(
            e.to_string(),
            "all AMM subcatchments must have names (record 3)"
        );
    }

    #[test]
    fn display_duplicate_name() {
        let e = ModelError::DuplicateName {
            name: "S1".to_string(),
        };
        assert_eq!(e.to_string(), "duplicate subcatchment name \"S1\"");
    }

    #[test]
    fn display_unknown_flow_unit() {
        let e = ModelError::UnknownFlowUnit {
            unit: "XYZ".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "unknown flow unit \"XYZ\" (expected CMS, LPS, MLD, CFS, GPM or MGD)"
        );
    }

    #[test]
    fn display_unknown_gage() {
        let e = ModelError::UnknownGage {
            name: "S1".to_string(),
            gage: "G9".to_string(),
        };
        assert_eq!(e.to_string(), "subcatchment \"S1\": unknown rain gage \"G9\"");
    }

    #[test]
    fn display_input_length() {
        let e = ModelError::InputLength {
            name: "S1".to_string(),
            input: "rain",
            expected: 10,
            got: 9,
        };
        assert_eq!(
            e.to_string(),
            "subcatchment \"S1\": rain input has 9 values, expected 10"
        );
    }

    #[test]
    fn from_series_error() {
        let se = amm_series::SeriesError::NoOverlap {
            name: "R".to_string(),
        };
        let me: ModelError = se.into();
        assert!(matches!(me, ModelError::Series(_)));
        assert_eq!(
            me.to_string(),
            "time series \"R\" does not overlap the simulation period"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ModelError>();
    }
}
