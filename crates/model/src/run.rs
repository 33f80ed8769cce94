//! Orchestration of a whole run: parsing, shared input caches, twins,
//! outlet summation and warnings.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use amm_calendar::SimulationClock;
use amm_series::{RainGage, TemperatureSource, conform_rainfall};

use crate::attributes::AttributeRecord;
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::params::{ParseContext, SubcatchmentParameters};
use crate::result::{Measurement, ResultSet};
use crate::simulator::{Forcing, SubcatchmentSimulator};
use crate::twin::TwinCache;

/// Outlet names longer than this may not survive fixed-width exchange
/// files.
pub const MAX_OUTLET_NAME_LEN: usize = 15;

/// Everything a run reads besides the subcatchment records.
#[derive(Debug, Clone)]
pub struct RunInputs {
    clock: SimulationClock,
    gages: Vec<RainGage>,
    temperature: TemperatureSource,
    nodes: Option<Vec<String>>,
}

impl RunInputs {
    /// Creates inputs for `clock` with the given rain gages and the
    /// default monthly temperature climatology.
    pub fn new(clock: SimulationClock, gages: Vec<RainGage>) -> Self {
        Self {
            clock,
            gages,
            temperature: TemperatureSource::default(),
            nodes: None,
        }
    }

    /// Sets the temperature source.
    pub fn with_temperature(mut self, temperature: TemperatureSource) -> Self {
        self.temperature = temperature;
        self
    }

    /// Restricts outlets to `nodes`.
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Returns the simulation clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Returns the rain gages.
    pub fn gages(&self) -> &[RainGage] {
        &self.gages
    }

    /// Returns the temperature source.
    pub fn temperature(&self) -> &TemperatureSource {
        &self.temperature
    }
}

/// A non-fatal finding reported after a successful run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// An outlet name longer than [`MAX_OUTLET_NAME_LEN`] characters.
    LongOutletName {
        /// The outlet name.
        outlet: String,
    },
    /// Summed percent capture of a subcatchment exceeds 100% at some step.
    ExcessCapture {
        /// Subcatchment name.
        subcatchment: String,
        /// Largest summed percent capture.
        peak_pct: f64,
    },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongOutletName { outlet } => write!(
                f,
                "outlet name \"{outlet}\" is longer than {MAX_OUTLET_NAME_LEN} characters \
                 and may be truncated in exchange files"
            ),
            Self::ExcessCapture {
                subcatchment,
                peak_pct,
            } => write!(
                f,
                "subcatchment \"{subcatchment}\": total percent capture reaches {peak_pct:.1}%"
            ),
        }
    }
}

/// Results of one subcatchment.
#[derive(Debug, Clone)]
pub struct SubcatchmentOutput {
    name: String,
    outlet: String,
    area_m2: f64,
    twin_of: Option<String>,
    results: ResultSet,
}

impl SubcatchmentOutput {
    /// Returns the subcatchment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outlet node.
    pub fn outlet(&self) -> &str {
        &self.outlet
    }

    /// Returns the area in m².
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Name of the twin whose results were scaled, if any.
    pub fn twin_of(&self) -> Option<&str> {
        self.twin_of.as_deref()
    }

    /// Returns the recorded series.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }
}

/// Output of [`run_subcatchments`].
#[derive(Debug, Clone)]
pub struct RunOutput {
    clock: SimulationClock,
    subcatchments: Vec<SubcatchmentOutput>,
    outlet_flows: BTreeMap<String, Vec<f64>>,
    warnings: Vec<RunWarning>,
}

impl RunOutput {
    /// Returns the clock the series are aligned to.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Returns per-subcatchment results in input order.
    pub fn subcatchments(&self) -> &[SubcatchmentOutput] {
        &self.subcatchments
    }

    /// Returns total flow per outlet per step, in the configured unit.
    pub fn outlet_flows(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.outlet_flows
    }

    /// Returns the non-fatal warnings.
    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }
}

/// Shared per-run state: conformed inputs and the twin cache.
///
/// Caches only grow. Conformed rain is kept per gage; temperatures are
/// computed once for the horizon and once per distinct lead-in length.
pub struct RunContext<'a> {
    inputs: &'a RunInputs,
    config: &'a ModelConfig,
    instants: Vec<NaiveDateTime>,
    gages: HashMap<&'a str, &'a RainGage>,
    rain: HashMap<String, Vec<f64>>,
    common_temps: Option<Vec<f64>>,
    lead_temps: HashMap<usize, Vec<f64>>,
    twins: TwinCache,
}

impl<'a> RunContext<'a> {
    /// Creates an empty context.
    pub fn new(inputs: &'a RunInputs, config: &'a ModelConfig) -> Self {
        Self {
            inputs,
            config,
            instants: inputs.clock.instants(),
            gages: inputs.gages.iter().map(|g| (g.name(), g)).collect(),
            rain: HashMap::new(),
            common_temps: None,
            lead_temps: HashMap::new(),
            twins: TwinCache::new(),
        }
    }

    /// Returns the twin cache.
    pub fn twins(&self) -> &TwinCache {
        &self.twins
    }

    /// Rain per step for `params`, zero-padded with the lead-in.
    fn rain_for(&mut self, params: &SubcatchmentParameters) -> Result<Vec<f64>, ModelError> {
        let name = params.gage();
        if !self.rain.contains_key(name) {
            let gage = self
                .gages
                .get(name)
                .ok_or_else(|| ModelError::UnknownGage {
                    name: params.name().to_string(),
                    gage: name.to_string(),
                })?;
            let depths = conform_rainfall(
                gage,
                &self.inputs.clock,
                self.config.unit_system().depth_to_m(),
            )?;
            self.rain.insert(name.to_string(), depths);
        }
        let lead = params.lead_in_len();
        let mut padded = vec![0.0; lead];
        if let Some(depths) = self.rain.get(name) {
            padded.extend_from_slice(depths);
        }
        Ok(padded)
    }

    /// Temperatures for `params`, lead-in first.
    fn temps_for(&mut self, params: &SubcatchmentParameters) -> Result<Vec<f64>, ModelError> {
        let source = &self.inputs.temperature;
        if self.common_temps.is_none() {
            self.common_temps = Some(source.horizon(&self.inputs.clock)?);
        }
        let lead = params.lead_in_len();
        if !self.lead_temps.contains_key(&lead) {
            let times = self.inputs.clock.lead_in(lead)?;
            self.lead_temps.insert(lead, source.at(&times)?);
        }
        let mut temps = self.lead_temps.get(&lead).cloned().unwrap_or_default();
        if let Some(common) = &self.common_temps {
            temps.extend_from_slice(common);
        }
        Ok(temps)
    }

    /// Produces results for one subcatchment, from its twin when allowed.
    ///
    /// Returns the results and the name of the twin used, if any.
    pub fn simulate(
        &mut self,
        params: &SubcatchmentParameters,
    ) -> Result<(ResultSet, Option<String>), ModelError> {
        let key = params.twin_key();
        if self.config.use_twins()
            && let Some(twin) = self.twins.get(&key)
        {
            debug!(
                subcatchment = params.name(),
                twin = twin.name(),
                "reusing twin results"
            );
            return Ok((twin.scaled_to(params.area_m2()), Some(twin.name().to_string())));
        }

        let rain = self.rain_for(params)?;
        let temps = self.temps_for(params)?;
        let forcing = Forcing {
            instants: &self.instants,
            rain: &rain,
            temps: &temps,
        };
        let simulator = SubcatchmentSimulator::new(
            params,
            self.inputs.clock.step_seconds(),
            self.config.flow_unit(),
        );
        let results = simulator.run(&forcing, self.config.measurements())?;
        debug!(
            subcatchment = params.name(),
            lead_in = params.lead_in_len(),
            peak_capture_pct = results.peak_capture_pct(),
            "simulated subcatchment"
        );

        if self.config.use_twins() {
            self.twins
                .register(key, params.name(), params.area_m2(), &results);
        }
        Ok((results, None))
    }
}

/// Parses every record, rejecting duplicates. All records are validated
/// before any simulation starts.
///
/// # Errors
///
/// The first [`ModelError`] raised by a record, or
/// [`ModelError::DuplicateName`].
pub fn parse_subcatchments<R: AttributeRecord>(
    records: &[R],
    ctx: &ParseContext,
) -> Result<Vec<SubcatchmentParameters>, ModelError> {
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let params = SubcatchmentParameters::from_record(record, i, ctx)?;
        if !seen.insert(params.name().to_string()) {
            return Err(ModelError::DuplicateName {
                name: params.name().to_string(),
            });
        }
        parsed.push(params);
    }
    Ok(parsed)
}

/// Runs every subcatchment in `records` over the horizon of `inputs`.
///
/// A failure at any subcatchment aborts the whole run.
///
/// # Errors
///
/// Any parsing, validation or input series error.
#[tracing::instrument(skip_all, fields(subcatchments = records.len()))]
pub fn run_subcatchments<R: AttributeRecord>(
    records: &[R],
    inputs: &RunInputs,
    config: &ModelConfig,
) -> Result<RunOutput, ModelError> {
    let mut ctx = ParseContext::new(
        config.unit_system(),
        inputs.clock.step_minutes(),
        inputs.gages.iter().map(|g| g.name().to_string()),
    );
    if let Some(nodes) = &inputs.nodes {
        ctx = ctx.with_nodes(nodes.iter().cloned());
    }
    let params = parse_subcatchments(records, &ctx)?;
    inputs.temperature.validate_for(&inputs.clock)?;

    info!(
        subcatchments = params.len(),
        steps = inputs.clock.len(),
        flow_unit = %config.flow_unit(),
        "starting AMM run"
    );

    let mut run = RunContext::new(inputs, config);
    let mut subcatchments = Vec::with_capacity(params.len());
    for p in &params {
        let (results, twin_of) = run.simulate(p)?;
        subcatchments.push(SubcatchmentOutput {
            name: p.name().to_string(),
            outlet: p.outlet().to_string(),
            area_m2: p.area_m2(),
            twin_of,
            results,
        });
    }

    let steps = inputs.clock.len();
    let mut outlet_flows: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for s in &subcatchments {
        let sum = outlet_flows
            .entry(s.outlet.clone())
            .or_insert_with(|| vec![0.0; steps]);
        if let Some(total) = s.results.get(Measurement::RunoffTotal) {
            sum.iter_mut().zip(total).for_each(|(acc, q)| *acc += q);
        }
    }

    let mut warnings: Vec<RunWarning> = outlet_flows
        .keys()
        .filter(|o| o.chars().count() > MAX_OUTLET_NAME_LEN)
        .map(|o| RunWarning::LongOutletName { outlet: o.clone() })
        .collect();
    warnings.extend(
        subcatchments
            .iter()
            .filter(|s| s.results.peak_capture_pct() > 100.0)
            .map(|s| RunWarning::ExcessCapture {
                subcatchment: s.name.clone(),
                peak_pct: s.results.peak_capture_pct(),
            }),
    );

    let twins_used = subcatchments.iter().filter(|s| s.twin_of.is_some()).count();
    info!(
        subcatchments = subcatchments.len(),
        twins_used,
        parameter_sets = run.twins().len(),
        outlets = outlet_flows.len(),
        warnings = warnings.len(),
        "AMM run complete"
    );

    Ok(RunOutput {
        clock: inputs.clock.clone(),
        subcatchments,
        outlet_flows,
        warnings,
    })
}
