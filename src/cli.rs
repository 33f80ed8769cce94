use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AMM subcatchment runoff simulator.
#[derive(Parser)]
#[command(
    name = "amm",
    version,
    about = "Antecedent Moisture Model runoff simulation"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate every subcatchment and write the series file.
    Run(RunArgs),
    /// List the series stored in a series file.
    Inspect(InspectArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "amm.toml")]
    pub config: PathBuf,

    /// Override output series file path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Simulate every subcatchment even when an identical one already ran.
    #[arg(long)]
    pub no_twins: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the series file.
    #[arg(short, long)]
    pub file: PathBuf,

    /// Print a JSON summary instead of one line per series.
    #[arg(long)]
    pub json: bool,
}
