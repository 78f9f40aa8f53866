use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Creek water-level simulator.
#[derive(Parser)]
#[command(
    name = "creek",
    version,
    about = "Creek water-level simulation from rainfall, with peak-matching validation"
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
    /// Simulate water levels for one precipitation event.
    Simulate(SimulateArgs),
    /// Simulate events and score them against observed levels.
    Validate(ValidateArgs),
    /// Run one event under several antecedent soil states.
    Scenarios(ScenariosArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Basin to simulate (ravone, quaderna).
    #[arg(short, long)]
    pub basin: String,

    /// Event CSV with timestamp and precipitation columns.
    #[arg(short, long)]
    pub event: PathBuf,

    /// Daily soil balance CSV (date, deficit35, deficit90).
    #[arg(short, long)]
    pub soil: PathBuf,

    /// Output CSV path (default: <event>.simulated.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the reseed policy from config (keep_runoff, blend).
    #[arg(long)]
    pub reseed_policy: Option<String>,
}

/// Arguments for the `validate` subcommand.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Basin the events belong to.
    #[arg(short, long)]
    pub basin: String,

    /// Daily soil balance CSV covering every event.
    #[arg(short, long)]
    pub soil: PathBuf,

    /// Event CSVs carrying an observed level column.
    #[arg(required = true)]
    pub events: Vec<PathBuf>,

    /// Path for the JSON report (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the reseed policy from config (keep_runoff, blend).
    #[arg(long)]
    pub reseed_policy: Option<String>,
}

/// Arguments for the `scenarios` subcommand.
#[derive(clap::Args)]
pub struct ScenariosArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Basin to simulate.
    #[arg(short, long)]
    pub basin: String,

    /// Event CSV with timestamp and precipitation columns.
    #[arg(short, long)]
    pub event: PathBuf,

    /// Comma-separated 90 cm deficits (mm); overrides [scenarios] in config.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub deficit90: Option<Vec<f64>>,

    /// Directory for one output CSV per scenario.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Path for the JSON summary (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
