//! Shared domain types.
//!
//! These types are kept small and mostly serializable so they can be:
//!
//! - passed between the search coordinator and its callers
//! - exported to CSV/JSON
//! - compared in tests (sequential vs parallel sweeps)

use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FitError};

/// Smallest subset size evaluated by a default sweep.
pub const MIN_SUBSET_SIZE: usize = 4;

/// A validated observation matrix plus its target vector.
///
/// Rows are immutable once constructed; every fit in a sweep borrows them.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Vec<f64>>,
    target: Vec<f64>,
    feature_count: usize,
    feature_names: Vec<String>,
}

impl Dataset {
    /// Validate and wrap a parsed observation matrix and target.
    ///
    /// All rows must have the same length as the first row, and there must be
    /// exactly one target value per row.
    pub fn new(rows: Vec<Vec<f64>>, target: Vec<f64>) -> Result<Self, FitError> {
        if rows.len() != target.len() {
            return Err(FitError::TargetLength {
                rows: rows.len(),
                targets: target.len(),
            });
        }

        let feature_count = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != feature_count) {
            return Err(FitError::RowLength {
                row,
                expected: feature_count,
                found: r.len(),
            });
        }

        Ok(Self {
            rows,
            target,
            feature_count,
            feature_names: Vec::new(),
        })
    }

    /// Attach column names (used for reporting only).
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = names;
        self
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn n_obs(&self) -> usize {
        self.rows.len()
    }

    pub fn feature_name(&self, idx: usize) -> Option<&str> {
        self.feature_names.get(idx).map(String::as_str)
    }

    /// Human-readable labels for a subset: header names when known, else `x{idx}`.
    pub fn subset_labels(&self, subset: &[usize]) -> Vec<String> {
        subset
            .iter()
            .map(|&idx| match self.feature_name(idx) {
                Some(name) => name.to_string(),
                None => format!("x{idx}"),
            })
            .collect()
    }

    pub fn label(&self, record: &FitRecord) -> LabeledRecord {
        LabeledRecord {
            features: self.subset_labels(&record.subset),
            record: record.clone(),
        }
    }
}

/// How fits within one subset size are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    Parallel,
    Sequential,
}

/// Score used to rank fit records (lower is better for both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    Aic,
    Mse,
}

impl RankBy {
    pub fn score(self, record: &FitRecord) -> f64 {
        match self {
            RankBy::Aic => record.aic,
            RankBy::Mse => record.mse,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RankBy::Aic => "AIC",
            RankBy::Mse => "MSE",
        }
    }
}

/// A sweep's configuration as understood by the coordinator.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Serialize)]
pub struct SearchConfig {
    /// Smallest subset size evaluated.
    pub min_size: usize,
    /// Largest subset size evaluated (`None` = feature count).
    pub max_size: Option<usize>,
    /// Worker count: 0 = all cores, 1 = sequential, n = bounded pool of n.
    pub threads: usize,
    pub dispatch: Dispatch,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SUBSET_SIZE,
            max_size: None,
            threads: 0,
            dispatch: Dispatch::Parallel,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_size == 0 {
            return Err(AppError::new(2, "Minimum subset size must be >= 1."));
        }
        if let Some(max) = self.max_size {
            if max < self.min_size {
                return Err(AppError::new(
                    2,
                    format!(
                        "Maximum subset size ({max}) is below the minimum ({}).",
                        self.min_size
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Subset sizes swept for a dataset with `feature_count` columns.
    ///
    /// The upper bound is clamped to the feature count; the range is empty when
    /// there are fewer features than `min_size`.
    pub fn size_range(&self, feature_count: usize) -> RangeInclusive<usize> {
        let max = self.max_size.unwrap_or(feature_count).min(feature_count);
        self.min_size..=max
    }
}

/// One fitted subset: the unit of output of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitRecord {
    /// Strictly increasing feature indices.
    pub subset: Vec<usize>,
    /// One coefficient per selected feature, then the intercept.
    pub coefficients: Vec<f64>,
    pub mse: f64,
    pub aic: f64,
    /// Set when any coefficient or score is non-finite (near-singular system).
    pub degenerate: bool,
}

impl FitRecord {
    pub fn new(subset: Vec<usize>, coefficients: Vec<f64>, mse: f64, aic: f64) -> Self {
        let degenerate =
            !(coefficients.iter().all(|c| c.is_finite()) && mse.is_finite() && aic.is_finite());
        Self {
            subset,
            coefficients,
            mse,
            aic,
            degenerate,
        }
    }

    pub fn size(&self) -> usize {
        self.subset.len()
    }

    pub fn intercept(&self) -> Option<f64> {
        self.coefficients.last().copied()
    }
}

/// Result of attempting one subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetOutcome {
    pub subset: Vec<usize>,
    pub result: Result<FitRecord, FitError>,
}

/// All outcomes for one subset size, delivered once every fit of that size is done.
#[derive(Debug, Clone)]
pub struct SizeBatch {
    pub size: usize,
    pub outcomes: Vec<SubsetOutcome>,
}

impl SizeBatch {
    pub fn records(&self) -> impl Iterator<Item = &FitRecord> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }
}

/// Counters for a completed sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub sizes: Vec<usize>,
    pub evaluated: usize,
    pub failed: usize,
    pub degenerate: usize,
}

/// A fit record with its feature labels (for exports).
#[derive(Debug, Clone, Serialize)]
pub struct LabeledRecord {
    pub features: Vec<String>,
    #[serde(flatten)]
    pub record: FitRecord,
}

/// A saved sweep summary (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFile {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub input: Option<PathBuf>,
    pub target: String,
    pub n_rows: usize,
    pub n_features: usize,
    pub config: SearchConfig,
    pub summary: SearchSummary,
    pub rank_by: RankBy,
    pub top: Vec<LabeledRecord>,
    pub best_per_size: Vec<LabeledRecord>,
}

/// Wall-clock runtimes of repeated full sweeps, in microseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrialStats {
    pub runtimes_us: Vec<u128>,
    pub total_us: u128,
    pub mean_us: f64,
}

impl TrialStats {
    pub fn from_runtimes(runtimes_us: Vec<u128>) -> Self {
        let total_us: u128 = runtimes_us.iter().sum();
        let mean_us = if runtimes_us.is_empty() {
            0.0
        } else {
            total_us as f64 / runtimes_us.len() as f64
        };
        Self {
            runtimes_us,
            total_us,
            mean_us,
        }
    }
}
