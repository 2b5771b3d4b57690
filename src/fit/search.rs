//! Exhaustive subset search.
//!
//! For each subset size `k` in the configured range the coordinator:
//!
//! 1. enumerates every `k`-subset of the feature columns
//! 2. fits each subset independently (parallel within `k`, on a bounded pool)
//! 3. waits for all fits of size `k`, then hands the batch to the caller
//!
//! Fits share only the read-only dataset; each one owns its design matrix and
//! solver scratch. A structural failure in one subset is recorded in its outcome
//! and the sweep moves on.

use std::ops::RangeInclusive;

use log::{debug, info, warn};

use crate::domain::{Dataset, FitRecord, SearchConfig, SearchSummary, SizeBatch, SubsetOutcome};
use crate::error::AppError;
use crate::fit::dispatch::{Parallelism, run_with_threads};
use crate::fit::fitter::fit_subset;
use crate::math::{binomial, combinations};

/// Drives a full sweep over one dataset.
#[derive(Debug, Clone)]
pub struct SearchCoordinator<'a> {
    dataset: &'a Dataset,
    config: SearchConfig,
}

impl<'a> SearchCoordinator<'a> {
    pub fn new(dataset: &'a Dataset, config: SearchConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { dataset, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Subset sizes this sweep covers (empty if there are too few features).
    pub fn sizes(&self) -> RangeInclusive<usize> {
        self.config.size_range(self.dataset.feature_count())
    }

    /// Number of subsets the sweep will fit, saturating at `u64::MAX`.
    pub fn total_subsets(&self) -> u64 {
        let n = self.dataset.feature_count();
        self.sizes()
            .fold(0u64, |acc, k| acc.saturating_add(binomial(n, k)))
    }

    /// Run the sweep, handing each completed size batch to `sink`.
    ///
    /// Batches arrive in increasing `k`; outcomes within a batch are in
    /// lexicographic subset order regardless of dispatch mode.
    pub fn run<F>(&self, mut sink: F) -> Result<SearchSummary, AppError>
    where
        F: FnMut(SizeBatch) + Send,
    {
        let n = self.dataset.feature_count();
        info!(
            "Sweeping subset sizes {:?} over {n} features and {} rows ({} fits)",
            self.sizes(),
            self.dataset.n_obs(),
            self.total_subsets()
        );

        run_with_threads(self.worker_threads(), |parallelism| {
            let mut summary = SearchSummary::default();
            for k in self.sizes() {
                info!("Regression with {k} variables");
                let outcomes = self.fit_all(parallelism, combinations(n, k));
                tally(&mut summary, &outcomes);
                summary.sizes.push(k);
                debug!("Size {k}: {} subsets fitted", outcomes.len());
                sink(SizeBatch { size: k, outcomes });
            }
            summary
        })
    }

    /// Run the sweep and keep every outcome.
    pub fn collect(&self) -> Result<Vec<SubsetOutcome>, AppError> {
        let mut out = Vec::new();
        self.run(|batch| out.extend(batch.outcomes))?;
        Ok(out)
    }

    /// Run the sweep and keep only the successful fits.
    pub fn collect_records(&self) -> Result<Vec<FitRecord>, AppError> {
        Ok(self
            .collect()?
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect())
    }

    /// Fit an explicit list of subsets (e.g. supplied by a caller rather than
    /// enumerated). Indices are checked per subset; bad subsets fail alone.
    pub fn evaluate(&self, subsets: Vec<Vec<usize>>) -> Result<Vec<SubsetOutcome>, AppError> {
        run_with_threads(self.worker_threads(), |parallelism| {
            let outcomes = self.fit_all(parallelism, subsets);
            for o in &outcomes {
                if let Err(e) = &o.result {
                    warn!("Subset {:?} failed: {e}", o.subset);
                }
            }
            outcomes
        })
    }

    fn worker_threads(&self) -> usize {
        match self.config.dispatch {
            crate::domain::Dispatch::Sequential => 1,
            crate::domain::Dispatch::Parallel => self.config.threads,
        }
    }

    fn fit_all(&self, parallelism: Parallelism, subsets: Vec<Vec<usize>>) -> Vec<SubsetOutcome> {
        let rows = self.dataset.rows();
        let target = self.dataset.target();
        parallelism.maybe_par_map(subsets, |subset| {
            let result = fit_subset(rows, target, &subset);
            SubsetOutcome { subset, result }
        })
    }
}

fn tally(summary: &mut SearchSummary, outcomes: &[SubsetOutcome]) {
    for o in outcomes {
        match &o.result {
            Ok(record) => {
                summary.evaluated += 1;
                if record.degenerate {
                    summary.degenerate += 1;
                    debug!("Subset {:?} produced non-finite scores", o.subset);
                }
            }
            Err(e) => {
                summary.failed += 1;
                warn!("Subset {:?} failed: {e}", o.subset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::data::{SyntheticOptions, generate_linear_dataset};
    use crate::domain::Dispatch;
    use crate::error::FitError;

    fn dataset(features: usize, seed: u64) -> Dataset {
        generate_linear_dataset(&SyntheticOptions {
            rows: 60,
            features,
            active: vec![(0, 1.0), (1, -0.5), (2, 2.0), (features - 1, 1.25)],
            intercept: 4.0,
            noise_sd: 0.5,
            seed,
        })
        .unwrap()
    }

    #[test]
    fn six_features_yield_twenty_two_unique_fits() {
        let ds = dataset(6, 1);
        let coordinator = SearchCoordinator::new(&ds, SearchConfig::default()).unwrap();
        assert_eq!(coordinator.total_subsets(), 22);

        let mut sizes = Vec::new();
        let summary = coordinator
            .run(|batch| sizes.push((batch.size, batch.outcomes.len())))
            .unwrap();

        assert_eq!(sizes, vec![(4, 15), (5, 6), (6, 1)]);
        assert_eq!(summary.evaluated, 22);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.sizes, vec![4, 5, 6]);

        let records = coordinator.collect_records().unwrap();
        let unique: HashSet<Vec<usize>> = records.iter().map(|r| r.subset.clone()).collect();
        assert_eq!(unique.len(), 22);
        for r in &records {
            assert_eq!(r.coefficients.len(), r.size() + 1);
        }
    }

    #[test]
    fn parallel_and_sequential_sweeps_agree() {
        let ds = dataset(7, 2);
        let parallel = SearchCoordinator::new(
            &ds,
            SearchConfig {
                threads: 4,
                ..SearchConfig::default()
            },
        )
        .unwrap()
        .collect()
        .unwrap();
        let sequential = SearchCoordinator::new(
            &ds,
            SearchConfig {
                dispatch: Dispatch::Sequential,
                ..SearchConfig::default()
            },
        )
        .unwrap()
        .collect()
        .unwrap();

        assert_eq!(parallel.len(), 35 + 21 + 7 + 1);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn too_few_features_is_an_empty_sweep() {
        let ds = Dataset::new(vec![vec![1.0, 2.0, 3.0]; 5], vec![1.0; 5]).unwrap();
        let coordinator = SearchCoordinator::new(&ds, SearchConfig::default()).unwrap();
        let summary = coordinator.run(|_| panic!("no batches expected")).unwrap();
        assert_eq!(summary, SearchSummary::default());
    }

    #[test]
    fn size_limits_are_respected() {
        let ds = dataset(6, 3);
        let config = SearchConfig {
            min_size: 2,
            max_size: Some(3),
            ..SearchConfig::default()
        };
        let records = SearchCoordinator::new(&ds, config)
            .unwrap()
            .collect_records()
            .unwrap();
        assert_eq!(records.len(), 15 + 20);
        assert!(records.iter().all(|r| (2..=3).contains(&r.size())));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let ds = dataset(6, 4);
        let config = SearchConfig {
            min_size: 5,
            max_size: Some(4),
            ..SearchConfig::default()
        };
        let err = SearchCoordinator::new(&ds, config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_subset_fails_alone() {
        let ds = dataset(5, 5);
        let coordinator = SearchCoordinator::new(&ds, SearchConfig::default()).unwrap();
        let outcomes = coordinator
            .evaluate(vec![vec![0, 1, 2, 3], vec![0, 1, 2, 9], vec![1, 2, 3, 4]])
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert_eq!(
            outcomes[1].result,
            Err(FitError::InvalidIndex {
                index: 9,
                feature_count: 5
            })
        );
        assert!(outcomes[2].result.is_ok());
    }
}
