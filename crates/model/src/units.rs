//! Flow units, unit systems and their conversion factors.
//!
//! The model computes in SI (m, m², m³/s, 1/m). Values are converted on the
//! way in during parameter parsing and on the way out during recording.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Metric or imperial inputs, implied by the flow unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Hectares, millimetres.
    Metric,
    /// Acres, inches.
    Imperial,
}

impl UnitSystem {
    /// Entered area unit (ha or ac) to m².
    pub fn area_to_m2(self) -> f64 {
        match self {
            Self::Metric => 1e4,
            Self::Imperial => 4046.86,
        }
    }

    /// Polygon area (m² or ft²) to the entered area unit.
    pub fn polygon_area_scale(self) -> f64 {
        match self {
            Self::Metric => 1e-4,
            Self::Imperial => 2.2957e-5,
        }
    }

    /// Entered depth unit (mm or in) to metres.
    pub fn depth_to_m(self) -> f64 {
        match self {
            Self::Metric => 0.001,
            Self::Imperial => 0.0254,
        }
    }

    /// Entered SHCF unit (1/mm or 1/in) to 1/m.
    pub fn shcf_to_per_m(self) -> f64 {
        match self {
            Self::Metric => 1000.0,
            Self::Imperial => 39.37,
        }
    }

    /// Label of the depth unit.
    pub fn depth_label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }

    /// Label of the SHCF unit.
    pub fn shcf_label(self) -> &'static str {
        match self {
            Self::Metric => "1/mm",
            Self::Imperial => "1/in",
        }
    }
}

/// Flow unit of the hydraulic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowUnit {
    /// Cubic metres per second.
    #[default]
    Cms,
    /// Litres per second.
    Lps,
    /// Megalitres per day.
    Mld,
    /// Cubic feet per second.
    Cfs,
    /// US gallons per minute.
    Gpm,
    /// Million US gallons per day.
    Mgd,
}

impl FlowUnit {
    /// One unit of this flow in m³/s.
    pub fn to_cms(self) -> f64 {
        match self {
            Self::Cms => 1.0,
            Self::Lps => 0.001,
            Self::Mld => 1000.0 / 86400.0,
            Self::Cfs => 0.028316847,
            Self::Gpm => 0.000063090196666667,
            Self::Mgd => 0.0438126364,
        }
    }

    /// Unit system implied by this flow unit.
    pub fn system(self) -> UnitSystem {
        match self {
            Self::Cms | Self::Lps | Self::Mld => UnitSystem::Metric,
            Self::Cfs | Self::Gpm | Self::Mgd => UnitSystem::Imperial,
        }
    }

    /// Short label used in series files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cms => "m3/s",
            Self::Lps => "L/s",
            Self::Mld => "ML/d",
            Self::Cfs => "cfs",
            Self::Gpm => "gpm",
            Self::Mgd => "mgd",
        }
    }
}

impl fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cms => "CMS",
            Self::Lps => "LPS",
            Self::Mld => "MLD",
            Self::Cfs => "CFS",
            Self::Gpm => "GPM",
            Self::Mgd => "MGD",
        };
        f.write_str(name)
    }
}

impl FromStr for FlowUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CMS" => Ok(Self::Cms),
            "LPS" => Ok(Self::Lps),
            "MLD" => Ok(Self::Mld),
            "CFS" => Ok(Self::Cfs),
            "GPM" => Ok(Self::Gpm),
            "MGD" => Ok(Self::Mgd),
            _ => Err(ModelError::UnknownFlowUnit {
                unit: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("cfs".parse::<FlowUnit>().unwrap(), FlowUnit::Cfs);
        assert_eq!(" LPS ".parse::<FlowUnit>().unwrap(), FlowUnit::Lps);
        assert!(matches!(
            "m3s".parse::<FlowUnit>(),
            Err(ModelError::UnknownFlowUnit { .. })
        ));
    }

    #[test]
    fn display_round_trips_parse() {
        for u in [
            FlowUnit::Cms,
            FlowUnit::Lps,
            FlowUnit::Mld,
            FlowUnit::Cfs,
            FlowUnit::Gpm,
            FlowUnit::Mgd,
        ] {
            assert_eq!(u.to_string().parse::<FlowUnit>().unwrap(), u);
        }
    }

    #[test]
    fn systems() {
        assert_eq!(FlowUnit::Mld.system(), UnitSystem::Metric);
        assert_eq!(FlowUnit::Gpm.system(), UnitSystem::Imperial);
    }

    #[test]
    fn mld_factor() {
        assert_relative_eq!(FlowUnit::Mld.to_cms(), 0.011574074074, epsilon = 1e-12);
    }

    #[test]
    fn labels() {
        assert_eq!(FlowUnit::Mld.label(), "ML/d");
        assert_eq!(UnitSystem::Imperial.shcf_label(), "1/in");
        assert_eq!(UnitSystem::Metric.depth_label(), "mm");
    }
}
