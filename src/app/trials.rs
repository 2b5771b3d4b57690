//! Repeated timed sweeps.
//!
//! Each trial runs the complete sweep (every size, every subset) and records its
//! wall-clock runtime in microseconds. Fit output is discarded.

use std::time::Instant;

use log::debug;

use crate::domain::{Dataset, SearchConfig, TrialStats};
use crate::error::AppError;
use crate::fit::search::SearchCoordinator;

pub fn run_trials(dataset: &Dataset, config: &SearchConfig, trials: usize) -> Result<TrialStats, AppError> {
    if trials == 0 {
        return Err(AppError::new(2, "Trial count must be > 0."));
    }

    let coordinator = SearchCoordinator::new(dataset, config.clone())?;
    let mut runtimes = Vec::with_capacity(trials);
    for trial in 0..trials {
        let start = Instant::now();
        let summary = coordinator.run(|_| {})?;
        let elapsed = start.elapsed().as_micros();
        debug!("Trial {}: {} fits in {elapsed} us", trial + 1, summary.evaluated);
        runtimes.push(elapsed);
    }

    Ok(TrialStats::from_runtimes(runtimes))
}
