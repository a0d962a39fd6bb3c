use crate::config::Species;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MassCCS developers",
    version,
    about = "MassCCS CLI - Evaluate the force and potential energy of a gas probe (He, N2, CO2) near a fixed target molecule.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate force and energy with the probe at a single position.
    Eval(EvalArgs),
    /// Evaluate force and energy along a straight path of probe positions.
    Scan(ScanArgs),
}

/// Inputs and overrides shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the target table (CSV with x,y,z,charge,epsilon,sigma columns).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub target: PathBuf,

    /// Path to the run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the probe species from the config file.
    #[arg(long, value_enum, value_name = "SPECIES")]
    pub species: Option<Species>,

    /// Override the Lennard-Jones cutoff (Å).
    #[arg(long, value_name = "FLOAT")]
    pub lj_cutoff: Option<f64>,

    /// Override the Coulomb cutoff (Å).
    #[arg(long, value_name = "FLOAT")]
    pub coul_cutoff: Option<f64>,

    /// Override the probe polarizability (Å³).
    #[arg(long, value_name = "FLOAT")]
    pub polarizability: Option<f64>,

    /// Override the probe (center site) charge (e).
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub charge: Option<f64>,

    /// Loop over every target atom instead of using the cell list.
    #[arg(long)]
    pub brute_force: bool,
}

/// Arguments for the `eval` subcommand.
#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Probe (center) position in Å.
    #[arg(
        long,
        required = true,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_hyphen_values = true
    )]
    pub at: Vec<f64>,

    /// Also print the three axis placements of a diatomic probe and their weights.
    #[arg(long)]
    pub details: bool,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// First probe position of the path in Å.
    #[arg(
        long,
        required = true,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_hyphen_values = true
    )]
    pub from: Vec<f64>,

    /// Last probe position of the path in Å.
    #[arg(
        long,
        required = true,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_hyphen_values = true
    )]
    pub to: Vec<f64>,

    /// Number of evenly spaced positions, both ends included.
    #[arg(short = 'n', long, default_value_t = 100, value_name = "INT")]
    pub points: usize,

    /// Write the profile to a CSV file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
