//! Command-line parsing for the best-subset regression tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{MIN_SUBSET_SIZE, RankBy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bss", version, about = "Exhaustive best-subset linear regression")]
pub struct Cli {
    /// Only log warnings and errors (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every feature subset, print the leaders and optionally export all fits.
    Search(SearchArgs),
    /// Repeat the full sweep and report wall-clock runtimes.
    Bench(BenchArgs),
    /// Write a synthetic linear dataset as CSV.
    Synth(SynthArgs),
}

/// Where the data comes from and how its columns are used.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Input CSV (numeric; one target column plus feature columns).
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Zero-based index of the target column.
    #[arg(long, default_value_t = 0)]
    pub target_column: usize,

    /// Drop a column by header name (repeatable).
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// The CSV has no header row.
    #[arg(long)]
    pub no_headers: bool,
}

/// Sweep shape and scheduling.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Smallest subset size to fit.
    #[arg(long, default_value_t = MIN_SUBSET_SIZE)]
    pub min_size: usize,

    /// Largest subset size to fit (default: all features).
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Worker threads (0 = one per core).
    #[arg(short = 't', long, default_value_t = 0)]
    pub threads: usize,

    /// Fit subsets one at a time on the calling thread.
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Score used to rank subsets.
    #[arg(long, value_enum, default_value_t = RankBy::Aic)]
    pub rank_by: RankBy,

    /// Show the top-N subsets.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print coefficients and scores for every fitted subset.
    #[arg(long)]
    pub print_records: bool,

    /// Export every fit to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the sweep summary to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BenchArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Number of full sweeps to time.
    #[arg(long, default_value_t = 100)]
    pub trials: usize,

    /// Also write the runtime summary to this file.
    #[arg(short, long, value_name = "TXT")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Output CSV path.
    #[arg(short, long, value_name = "CSV")]
    pub output: PathBuf,

    /// Number of observations.
    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    /// Number of feature columns.
    #[arg(long, default_value_t = 6)]
    pub features: usize,

    /// Standard deviation of the Gaussian noise added to the target.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
