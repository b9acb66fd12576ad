use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// knnbench weighted kNN regression benchmark.
#[derive(Parser)]
#[command(
    name = "knnbench",
    version,
    about = "Weighted kNN regression benchmark workload"
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
    /// Run warmup and timed benchmark iterations.
    Run(RunArgs),
    /// Parse and validate a configuration file.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knnbench.toml")]
    pub config: PathBuf,

    /// Override the number of timed iterations from config.
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Override the number of concurrent iterations from config.
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Override the starting iteration counter from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write the timing report as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knnbench.toml")]
    pub config: PathBuf,
}
