use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "esg-bench",
    version,
    about = "ESG metric scoring against sector, size and region percentile benchmarks"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one company-period request file
    Score(ScoreCommand),
    /// Score every *.json request under a directory
    Batch(BatchCommand),
    /// Validate the percentile bands in a benchmark file
    Check(CheckCommand),
    /// Print the effective metric direction table
    Directions(DirectionsCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub input: PathBuf,
    #[arg(long)]
    pub benchmarks: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Directory holding esg.toml and .esg/local.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct BatchCommand {
    pub dir: PathBuf,
    #[arg(long)]
    pub benchmarks: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckCommand {
    pub benchmarks: PathBuf,
}

#[derive(Args)]
pub struct DirectionsCommand {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
