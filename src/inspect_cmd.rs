//! Inspect command: list the series stored in a series file.

use anyhow::{Context, Result};
use serde::Serialize;

use amm_io::{StoredSeries, read_series_file};

use crate::cli::InspectArgs;

#[derive(Debug, Serialize)]
struct SeriesSummary<'a> {
    category: &'a str,
    function: &'a str,
    unit: &'a str,
    location: &'a str,
    offset: u64,
    start: Option<String>,
    start_days: f64,
    interval: f64,
    count: usize,
    min: Option<f32>,
    max: Option<f32>,
}

impl<'a> SeriesSummary<'a> {
    fn new(series: &'a StoredSeries) -> Self {
        let labels = series.labels();
        let finite = || series.values().iter().copied().filter(|v| v.is_finite());
        Self {
            category: labels.category(),
            function: labels.function(),
            unit: labels.unit(),
            location: labels.location(),
            offset: series.offset(),
            start: series
                .start()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            start_days: series.start_days(),
            interval: series.interval(),
            count: series.len(),
            min: finite().reduce(f32::min),
            max: finite().reduce(f32::max),
        }
    }

    fn line(&self) -> String {
        let range = match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("{lo} .. {hi}"),
            _ => "-".to_string(),
        };
        format!(
            "{:<32} {:<16} {:<6} n={:<8} start={} step={}s range={range}",
            self.location,
            self.function,
            self.unit,
            self.count,
            self.start.as_deref().unwrap_or("?"),
            self.interval,
        )
    }
}

/// Print the contents of a series file.
pub fn run(args: InspectArgs) -> Result<()> {
    let stored = read_series_file(&args.file)
        .with_context(|| format!("failed to read series file: {}", args.file.display()))?;
    let summaries: Vec<SeriesSummary<'_>> = stored.iter().map(SeriesSummary::new).collect();

    if args.json {
        let text = serde_json::to_string_pretty(&summaries).context("failed to serialise summary")?;
        println!("{text}");
    } else {
        for s in &summaries {
            println!("{}", s.line());
        }
    }
    Ok(())
}
