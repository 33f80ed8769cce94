use std::path::PathBuf;

use amm_model::AttributeMap;
use serde::Deserialize;

/// Top-level AMM run configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmmConfig {
    /// Simulation horizon and units.
    pub simulation: SimulationToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,

    /// Temperature source.
    #[serde(default)]
    pub temperature: TemperatureToml,

    /// Valid outlet identifiers. Outlets are not checked when absent.
    #[serde(default)]
    pub nodes: Option<Vec<String>>,

    /// Rain gages.
    #[serde(default, rename = "gage")]
    pub gages: Vec<GageToml>,

    /// Named time series referenced by gages and temperature.
    #[serde(default)]
    pub timeseries: Vec<TimeSeriesToml>,

    /// Subcatchment attribute records, in run order.
    #[serde(default, rename = "subcatchment")]
    pub subcatchments: Vec<AttributeMap>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationToml {
    pub start: String,
    pub end: String,
    pub step_minutes: f64,
    #[serde(default = "default_flow_units")]
    pub flow_units: String,
    #[serde(default = "default_true")]
    pub use_twins: bool,
}

fn default_flow_units() -> String {
    "CMS".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub full_detail: bool,
    #[serde(default)]
    pub outlet_flows: Option<PathBuf>,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            full_detail: true,
            outlet_flows: None,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("AMM_Subcatchments.tsb")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureToml {
    #[serde(default = "default_temperature_mode")]
    pub mode: String,
    #[serde(default)]
    pub monthly: Option<[f64; 12]>,
    #[serde(default)]
    pub series: Option<String>,
}

impl Default for TemperatureToml {
    fn default() -> Self {
        Self {
            mode: default_temperature_mode(),
            monthly: None,
            series: None,
        }
    }
}

fn default_temperature_mode() -> String {
    "monthly".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GageToml {
    pub name: String,
    #[serde(default = "default_gage_source")]
    pub source: String,
    #[serde(default = "default_rain_format")]
    pub format: String,
    pub interval: String,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_gage_source() -> String {
    "timeseries".to_string()
}
fn default_rain_format() -> String {
    "INTENSITY".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesToml {
    pub name: String,
    #[serde(default)]
    pub points: Vec<PointToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointToml {
    pub time: String,
    pub value: f64,
}
