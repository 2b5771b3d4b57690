//! Shared "search pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> sweep -> leaderboard (+ optional per-fit CSV and record printing)
//!
//! The CLI can then focus on presentation.

use std::path::PathBuf;

use crate::domain::{RankBy, SearchConfig, SearchSummary};
use crate::error::AppError;
use crate::fit::search::SearchCoordinator;
use crate::fit::selection::Leaderboard;
use crate::io::export::RecordCsvWriter;
use crate::io::ingest::IngestedData;

/// What to do with the sweep output.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SearchConfig,
    pub rank_by: RankBy,
    pub top_n: usize,
    pub print_records: bool,
    pub export: Option<PathBuf>,
}

/// All computed outputs of a single `bss search` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub summary: SearchSummary,
    pub leaderboard: Leaderboard,
    pub exported_rows: Option<usize>,
}

/// Execute the sweep, streaming each size batch into the leaderboard and exports.
pub fn run_search(ingest: &IngestedData, options: &RunOptions) -> Result<RunOutput, AppError> {
    let dataset = &ingest.dataset;
    let coordinator = SearchCoordinator::new(dataset, options.config.clone())?;

    let mut leaderboard = Leaderboard::new(options.rank_by, options.top_n);
    let mut writer = options
        .export
        .as_deref()
        .map(RecordCsvWriter::create)
        .transpose()?;
    let mut write_error: Option<AppError> = None;

    let summary = coordinator.run(|batch| {
        leaderboard.push_batch(&batch);

        if options.print_records {
            for record in batch.records() {
                println!("{}", crate::report::format_record(record));
            }
        }

        // Stop writing after the first failure; the error is reported once the sweep ends.
        if write_error.is_none() {
            if let Some(w) = writer.as_mut() {
                if let Err(e) = w.write_batch(&batch, dataset) {
                    write_error = Some(e);
                }
            }
        }
    })?;

    if let Some(e) = write_error {
        return Err(e);
    }
    let exported_rows = writer.map(RecordCsvWriter::finish).transpose()?;

    Ok(RunOutput {
        summary,
        leaderboard,
        exported_rows,
    })
}
