//! Run command: simulate every subcatchment and write the series file.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use amm_io::write_series_file;
use amm_model::{RunOutput, run_subcatchments};

use crate::cli::RunArgs;
use crate::config::AmmConfig;
use crate::convert;

/// Outlet flow mapping as written to JSON.
#[derive(Serialize)]
struct OutletFlowsJson<'a> {
    flow_unit: String,
    start: String,
    step_seconds: f64,
    outlets: &'a BTreeMap<String, Vec<f64>>,
}

impl<'a> OutletFlowsJson<'a> {
    fn new(output: &'a RunOutput, flow_unit: String) -> Self {
        Self {
            flow_unit,
            start: output.clock().start().format("%Y-%m-%d %H:%M:%S").to_string(),
            step_seconds: output.clock().step_seconds(),
            outlets: output.outlet_flows(),
        }
    }
}

/// Run the simulation pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AmmConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let inputs = convert::build_run_inputs(&config)?;
    let model_cfg = convert::build_model_config(&config, args.no_twins)?;
    let output_path = args.output.unwrap_or_else(|| config.output.path.clone());

    let output = run_subcatchments(&config.subcatchments, &inputs, &model_cfg)
        .context("AMM run failed")?;
    let twins = output
        .subcatchments()
        .iter()
        .filter(|s| s.twin_of().is_some())
        .count();
    info!(
        subcatchments = output.subcatchments().len(),
        twins,
        outlets = output.outlet_flows().len(),
        "simulation complete"
    );
    for w in output.warnings() {
        warn!("{w}");
    }

    let blocks = convert::build_series_blocks(&output, &model_cfg);
    let bytes = write_series_file(&output_path, &blocks)
        .with_context(|| format!("failed to write series file: {}", output_path.display()))?;
    info!(
        path = %output_path.display(),
        series = blocks.len(),
        bytes,
        "series file written"
    );

    if let Some(path) = &config.output.outlet_flows {
        let json = OutletFlowsJson::new(&output, model_cfg.flow_unit().to_string());
        let text = serde_json::to_string_pretty(&json).context("failed to serialise outlet flows")?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write outlet flows: {}", path.display()))?;
        info!(path = %path.display(), "outlet flows written");
    }

    Ok(())
}
