use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Flowcast workflow forecaster.
#[derive(Parser)]
#[command(
    name = "flowcast",
    version,
    about = "Markov-chain forecasting of workflow state boards"
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
    /// Learn a model and print the full forecast and evaluation report.
    Report(ReportArgs),
    /// Forecast an ad-hoc board with a model trained on the whole input.
    Forecast(ForecastArgs),
    /// Convert a ticket export of state entry dates into state sequences.
    States(StatesArgs),
}

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the `report` subcommand.
#[derive(clap::Args)]
pub struct ReportArgs {
    /// Path to TOML configuration file (defaults to ./flowcast.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input sequence file from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override forecast horizon in days.
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Override number of Monte Carlo runs.
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file (defaults to ./flowcast.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input sequence file from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Items per state, comma separated (e.g. 0,5,0,0).
    #[arg(short, long, value_delimiter = ',')]
    pub board: Option<Vec<f64>>,

    /// Override forecast horizon in days.
    #[arg(short, long)]
    pub days: Option<u32>,
}

/// Arguments for the `states` subcommand.
#[derive(clap::Args)]
pub struct StatesArgs {
    /// Path to TOML configuration file (defaults to ./flowcast.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ticket file: one `final_status,date_0,date_1,...` line per ticket.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write sequences here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep only tickets that ended in the configured done status.
    #[arg(long)]
    pub only_done: bool,
}
