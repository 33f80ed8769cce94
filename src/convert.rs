//! Conversion functions: TOML config structs -> crate API types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::*;

use amm_calendar::{SeasonalTemperature, SimulationClock};
use amm_io::{SeriesBlock, SeriesLabels};
use amm_model::{FlowUnit, ModelConfig, Quantity, RunInputs, RunOutput};
use amm_series::{DataSource, RainFormat, RainGage, Sample, TemperatureSource, TimeSeries};

/// Category label of every series in the output file.
pub const CATEGORY: &str = "AMM Subcatchments";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses `YYYY-MM-DD HH:MM[:SS]` or `MM/DD/YYYY HH:MM[:SS]`; a bare date
/// means midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt)
            && let Some(t) = d.and_hms_opt(0, 0, 0)
        {
            return Ok(t);
        }
    }
    bail!("invalid date/time {s:?}: expected YYYY-MM-DD HH:MM[:SS] or MM/DD/YYYY HH:MM[:SS]")
}

/// Parses a recording interval `H:MM` or `H:MM:SS` into minutes.
pub fn parse_interval(s: &str) -> Result<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        bail!("invalid interval {s:?}: expected H:MM or H:MM:SS");
    }
    let mut fields = [0u32; 3];
    for (field, part) in fields.iter_mut().zip(&parts) {
        *field = part
            .parse()
            .with_context(|| format!("invalid interval {s:?}: {part:?} is not a number"))?;
    }
    let [hours, minutes, seconds] = fields;
    if minutes >= 60 || seconds >= 60 {
        bail!("invalid interval {s:?}: minutes and seconds must be below 60");
    }
    let total = f64::from(hours) * 60.0 + f64::from(minutes) + f64::from(seconds) / 60.0;
    if total <= 0.0 {
        bail!("invalid interval {s:?}: must be longer than zero");
    }
    Ok(total)
}

/// Parses a rain gage format name, case-insensitively.
pub fn parse_rain_format(s: &str) -> Result<RainFormat> {
    match s.to_uppercase().as_str() {
        "INTENSITY" => Ok(RainFormat::Intensity),
        "VOLUME" => Ok(RainFormat::Volume),
        "CUMULATIVE" => Ok(RainFormat::Cumulative),
        other => bail!("unknown rain format: {other:?}"),
    }
}

/// Builds the [`SimulationClock`] from the `[simulation]` section.
pub fn build_clock(sim: &SimulationToml) -> Result<SimulationClock> {
    let start = parse_datetime(&sim.start).context("simulation start")?;
    let end = parse_datetime(&sim.end).context("simulation end")?;
    SimulationClock::new(start, end, sim.step_minutes).context("invalid simulation horizon")
}

/// Builds every `[[timeseries]]` entry, keyed by name.
pub fn build_series(series: &[TimeSeriesToml]) -> Result<BTreeMap<String, TimeSeries>> {
    let mut out = BTreeMap::new();
    for ts in series {
        let samples = ts
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let time = parse_datetime(&p.time)
                    .with_context(|| format!("time series {:?}, point {i}", ts.name))?;
                Ok(Sample::new(time, p.value))
            })
            .collect::<Result<Vec<_>>>()?;
        if out
            .insert(ts.name.clone(), TimeSeries::new(&ts.name, samples))
            .is_some()
        {
            bail!("time series {:?} is defined more than once", ts.name);
        }
    }
    Ok(out)
}

fn lookup<'a>(series: &'a BTreeMap<String, TimeSeries>, name: &str) -> Result<&'a TimeSeries> {
    series
        .get(name)
        .with_context(|| format!("time series {name:?} is not defined"))
}

/// Builds the rain gages. A `file` source is passed through so the model
/// can reject it with its own message.
pub fn build_gages(
    gages: &[GageToml],
    series: &BTreeMap<String, TimeSeries>,
) -> Result<Vec<RainGage>> {
    gages
        .iter()
        .map(|g| {
            let format = parse_rain_format(&g.format)
                .with_context(|| format!("rain gage {:?}", g.name))?;
            let interval = parse_interval(&g.interval)
                .with_context(|| format!("rain gage {:?}", g.name))?;
            match g.source.to_lowercase().as_str() {
                "timeseries" => {
                    let name = g.series.as_deref().with_context(|| {
                        format!("rain gage {:?} has no series", g.name)
                    })?;
                    Ok(RainGage::new(
                        &g.name,
                        format,
                        interval,
                        lookup(series, name)?.clone(),
                    ))
                }
                "file" => {
                    let path = g
                        .file
                        .clone()
                        .with_context(|| format!("rain gage {:?} has no file", g.name))?;
                    Ok(
                        RainGage::new(&g.name, format, interval, TimeSeries::new(&g.name, vec![]))
                            .with_source(DataSource::File(path)),
                    )
                }
                other => bail!("rain gage {:?}: unknown source {other:?}", g.name),
            }
        })
        .collect()
}

/// Builds the temperature source from the `[temperature]` section.
pub fn build_temperature(
    temp: &TemperatureToml,
    series: &BTreeMap<String, TimeSeries>,
) -> Result<TemperatureSource> {
    match temp.mode.to_lowercase().as_str() {
        "monthly" => Ok(TemperatureSource::Seasonal(
            temp.monthly
                .map(SeasonalTemperature::new)
                .unwrap_or_default(),
        )),
        "series" => {
            let name = temp
                .series
                .as_deref()
                .context("temperature mode \"series\" needs a series name")?;
            Ok(TemperatureSource::Series(lookup(series, name)?.clone()))
        }
        other => bail!("unknown temperature mode: {other:?}"),
    }
}

/// Builds the run inputs: clock, gages, temperature and the node list.
pub fn build_run_inputs(config: &AmmConfig) -> Result<RunInputs> {
    let clock = build_clock(&config.simulation)?;
    let series = build_series(&config.timeseries)?;
    let gages = build_gages(&config.gages, &series)?;
    let temperature = build_temperature(&config.temperature, &series)?;
    let mut inputs = RunInputs::new(clock, gages).with_temperature(temperature);
    if let Some(nodes) = &config.nodes {
        inputs = inputs.with_nodes(nodes.clone());
    }
    Ok(inputs)
}

/// Builds a [`ModelConfig`]; `no_twins` forces twin reuse off.
pub fn build_model_config(config: &AmmConfig, no_twins: bool) -> Result<ModelConfig> {
    let flow_unit: FlowUnit = config.simulation.flow_units.parse()?;
    Ok(ModelConfig::new(flow_unit)
        .with_full_detail(config.output.full_detail)
        .with_twins(config.simulation.use_twins && !no_twins))
}

/// Returns the unit label written for a quantity.
pub fn unit_label(quantity: Quantity, config: &ModelConfig) -> &'static str {
    let system = config.unit_system();
    match quantity {
        Quantity::Runoff => config.flow_unit().label(),
        Quantity::PercentCapture => "%",
        Quantity::Shcf => system.shcf_label(),
        Quantity::Rain => system.depth_label(),
        Quantity::Temperature => "degrees",
    }
}

/// Lays out every subcatchment's result series as file blocks.
pub fn build_series_blocks<'a>(output: &'a RunOutput, config: &ModelConfig) -> Vec<SeriesBlock<'a>> {
    let clock = output.clock();
    output
        .subcatchments()
        .iter()
        .flat_map(|sub| {
            sub.results().iter().map(move |(m, values)| {
                let labels = SeriesLabels::new(
                    CATEGORY,
                    m.quantity().label(),
                    unit_label(m.quantity(), config),
                    m.location(sub.name()),
                );
                SeriesBlock::new(labels, clock.start(), clock.step_seconds(), values)
            })
        })
        .collect()
}
