//! CSV ingest and normalization.
//!
//! This module turns a numeric CSV (one target column plus feature columns) into a
//! validated `Dataset` that is safe to sweep.
//!
//! Design goals:
//! - **Strict schema** for the column layout (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (columns keep file order)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::warn;

use crate::domain::Dataset;
use crate::error::AppError;

/// How to interpret the CSV columns.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Zero-based index of the target column.
    pub target_column: usize,
    /// Header names of columns to drop (case-insensitive).
    pub exclude: Vec<String>,
    pub has_headers: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            target_column: 0,
            exclude: Vec::new(),
            has_headers: true,
        }
    }
}

/// Summary stats about the rows actually used.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub n_features: usize,
    pub target_min: f64,
    pub target_max: f64,
    pub target_mean: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated dataset + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub target_name: String,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a CSV file into a dataset.
pub fn load_dataset(path: &Path, opts: &IngestOptions) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_dataset(file, opts)
}

/// Read a dataset from any CSV source.
pub fn read_dataset<R: Read>(source: R, opts: &IngestOptions) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(opts.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    // Without headers, `headers()` peeks at the first record without consuming it,
    // so it still fixes the width.
    let first = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let names: Vec<String> = if opts.has_headers {
        first.iter().map(normalize_header_name).collect()
    } else {
        (0..first.len()).map(|i| format!("col{i}")).collect()
    };

    let layout = ColumnLayout::resolve(&names, opts)?;

    let mut rows = Vec::new();
    let mut target = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let first_line = if opts.has_headers { 2 } else { 1 };

    for (idx, result) in reader.records().enumerate() {
        let line = idx + first_line;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| layout.parse_record(&record, &names));

        match parsed {
            Ok((features, y)) => {
                rows.push(features);
                target.push(y);
            }
            Err(message) => {
                warn!("Skipping CSV line {line}: {message}");
                row_errors.push(RowError { line, message });
            }
        }
    }

    let rows_used = rows.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows remain after parsing."));
    }

    let stats = compute_stats(&target, layout.features.len());
    let feature_names = layout.features.iter().map(|&i| names[i].clone()).collect();
    let dataset = Dataset::new(rows, target)?.with_feature_names(feature_names);

    Ok(IngestedData {
        dataset,
        target_name: names[layout.target].clone(),
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Which columns feed the target and the features.
#[derive(Debug)]
struct ColumnLayout {
    width: usize,
    target: usize,
    features: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(names: &[String], opts: &IngestOptions) -> Result<Self, AppError> {
        let width = names.len();
        if opts.target_column >= width {
            return Err(AppError::new(
                2,
                format!(
                    "Target column {} is out of range for {width} columns.",
                    opts.target_column
                ),
            ));
        }

        let mut excluded = HashSet::new();
        for name in &opts.exclude {
            let idx = names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| AppError::new(2, format!("Excluded column `{name}` not found in CSV header.")))?;
            excluded.insert(idx);
        }
        if excluded.contains(&opts.target_column) {
            return Err(AppError::new(2, "The target column cannot be excluded."));
        }

        let features = (0..width)
            .filter(|i| *i != opts.target_column && !excluded.contains(i))
            .collect();

        Ok(Self {
            width,
            target: opts.target_column,
            features,
        })
    }

    fn parse_record(&self, record: &StringRecord, names: &[String]) -> Result<(Vec<f64>, f64), String> {
        if record.len() != self.width {
            return Err(format!("Expected {} fields, found {}.", self.width, record.len()));
        }

        let y = parse_cell(record, self.target, names)?;
        let features = self
            .features
            .iter()
            .map(|&i| parse_cell(record, i, names))
            .collect::<Result<Vec<f64>, String>>()?;
        Ok((features, y))
    }
}

fn parse_cell(record: &StringRecord, idx: usize, names: &[String]) -> Result<f64, String> {
    let raw = record.get(idx).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid number '{raw}' in column `{}`.", names[idx])),
    }
}

fn compute_stats(target: &[f64], n_features: usize) -> DatasetStats {
    let mut target_min = f64::INFINITY;
    let mut target_max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &y in target {
        target_min = target_min.min(y);
        target_max = target_max.max(y);
        sum += y;
    }

    DatasetStats {
        n_rows: target.len(),
        n_features,
        target_min,
        target_max,
        target_mean: sum / target.len() as f64,
    }
}
