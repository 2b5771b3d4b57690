//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads the dataset
//! - runs the subset sweep (or repeated timed sweeps)
//! - prints reports and writes optional exports

use clap::Parser;
use log::{info, warn};

use crate::cli::{BenchArgs, Command, DataArgs, SearchArgs, SweepArgs, SynthArgs};
use crate::data::{SyntheticOptions, generate_linear_dataset};
use crate::domain::{Dispatch, SearchConfig, SummaryFile};
use crate::error::AppError;
use crate::io::ingest::{IngestOptions, IngestedData, load_dataset};

pub mod pipeline;
pub mod trials;

/// Entry point for the `bss` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Command::Search(args) => handle_search(args),
        Command::Bench(args) => handle_bench(args),
        Command::Synth(args) => handle_synth(args),
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    // A logger may already be installed when embedded; keep the existing one.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

fn handle_search(args: SearchArgs) -> Result<(), AppError> {
    let ingest = load_input(&args.data)?;
    let options = pipeline::RunOptions {
        config: search_config_from_args(&args.sweep),
        rank_by: args.rank_by,
        top_n: args.top,
        print_records: args.print_records,
        export: args.export.clone(),
    };

    let run = pipeline::run_search(&ingest, &options)?;

    println!(
        "{}",
        crate::report::format_search_summary(
            &ingest.dataset,
            &ingest.target_name,
            &run.summary,
            &run.leaderboard,
        )
    );

    if let (Some(path), Some(rows)) = (&options.export, run.exported_rows) {
        info!("Wrote {rows} fits to {}", path.display());
    }

    if let Some(path) = &args.export_json {
        let summary = SummaryFile {
            tool: "bss".to_string(),
            generated_at: chrono::Local::now(),
            input: Some(args.data.input.clone()),
            target: ingest.target_name.clone(),
            n_rows: ingest.dataset.n_obs(),
            n_features: ingest.dataset.feature_count(),
            config: options.config.clone(),
            summary: run.summary.clone(),
            rank_by: options.rank_by,
            top: run
                .leaderboard
                .top()
                .iter()
                .map(|r| ingest.dataset.label(r))
                .collect(),
            best_per_size: run
                .leaderboard
                .best_per_size()
                .iter()
                .map(|r| ingest.dataset.label(r))
                .collect(),
        };
        crate::io::export::write_summary_json(path, &summary)?;
        info!("Wrote summary to {}", path.display());
    }

    Ok(())
}

fn handle_bench(args: BenchArgs) -> Result<(), AppError> {
    let ingest = load_input(&args.data)?;
    let config = search_config_from_args(&args.sweep);

    let stats = trials::run_trials(&ingest.dataset, &config, args.trials)?;
    let text = crate::report::format_trial_stats(&stats);
    println!("{text}");

    if let Some(path) = &args.output {
        std::fs::write(path, &text)
            .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
        info!("Wrote trial summary to {}", path.display());
    }

    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let defaults = SyntheticOptions::default();
    let opts = SyntheticOptions {
        rows: args.rows,
        features: args.features,
        active: defaults
            .active
            .into_iter()
            .filter(|(idx, _)| *idx < args.features)
            .collect(),
        noise_sd: args.noise,
        seed: args.seed,
        ..defaults
    };

    let dataset = generate_linear_dataset(&opts)?;
    crate::io::export::write_dataset_csv(&args.output, &dataset, "y")?;
    info!(
        "Wrote {} rows x {} features to {}",
        dataset.n_obs(),
        dataset.feature_count(),
        args.output.display()
    );
    Ok(())
}

fn load_input(args: &DataArgs) -> Result<IngestedData, AppError> {
    let opts = IngestOptions {
        target_column: args.target_column,
        exclude: args.exclude.clone(),
        has_headers: !args.no_headers,
    };
    let ingest = load_dataset(&args.input, &opts)?;

    if !ingest.row_errors.is_empty() {
        warn!(
            "Skipped {} of {} rows in {}",
            ingest.row_errors.len(),
            ingest.rows_read,
            args.input.display()
        );
    }
    info!(
        "Loaded {} rows, {} features, target `{}`",
        ingest.rows_used, ingest.stats.n_features, ingest.target_name
    );
    Ok(ingest)
}

pub fn search_config_from_args(args: &SweepArgs) -> SearchConfig {
    SearchConfig {
        min_size: args.min_size,
        max_size: args.max_size,
        threads: args.threads,
        dispatch: if args.sequential {
            Dispatch::Sequential
        } else {
            Dispatch::Parallel
        },
    }
}
