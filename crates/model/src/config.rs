//! Run-level model settings.

use crate::result::Measurement;
use crate::units::{FlowUnit, UnitSystem};

/// Settings shared by every subcatchment of a run.
///
/// # Example
///
/// ```
/// use amm_model::{FlowUnit, ModelConfig};
///
/// let config = ModelConfig::new(FlowUnit::Cfs)
///     .with_full_detail(false)
///     .with_twins(false);
///
/// assert_eq!(config.measurements().len(), 1);
/// assert!(!config.use_twins());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Unit of recorded flows; also selects the unit system.
    flow_unit: FlowUnit,
    /// Record all fourteen measurements instead of total runoff only.
    full_detail: bool,
    /// Reuse results of subcatchments with identical parameters.
    use_twins: bool,
}

impl ModelConfig {
    /// Creates a configuration recording flows in `flow_unit`.
    ///
    /// Defaults: `full_detail = true`, `use_twins = true`.
    pub fn new(flow_unit: FlowUnit) -> Self {
        Self {
            flow_unit,
            full_detail: true,
            use_twins: true,
        }
    }

    /// Sets whether every measurement is recorded.
    pub fn with_full_detail(mut self, full_detail: bool) -> Self {
        self.full_detail = full_detail;
        self
    }

    /// Sets whether twin subcatchments reuse a prior result.
    pub fn with_twins(mut self, use_twins: bool) -> Self {
        self.use_twins = use_twins;
        self
    }

    /// Returns the flow unit.
    pub fn flow_unit(&self) -> FlowUnit {
        self.flow_unit
    }

    /// Returns the unit system implied by the flow unit.
    pub fn unit_system(&self) -> UnitSystem {
        self.flow_unit.system()
    }

    /// Returns whether every measurement is recorded.
    pub fn full_detail(&self) -> bool {
        self.full_detail
    }

    /// Returns whether the twin cache is used.
    pub fn use_twins(&self) -> bool {
        self.use_twins
    }

    /// Measurements recorded at this detail level.
    pub fn measurements(&self) -> &'static [Measurement] {
        if self.full_detail {
            &Measurement::ALL
        } else {
            &Measurement::TOTAL_ONLY
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(FlowUnit::default())
    }
}
