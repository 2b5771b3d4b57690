//! Exports: per-fit CSV, sweep summary JSON, and dataset CSV.
//!
//! The per-fit CSV is written incrementally, one size batch at a time, so a large
//! sweep never needs to be held in memory.

use std::fs::File;
use std::path::Path;

use crate::domain::{Dataset, SizeBatch, SummaryFile};
use crate::error::AppError;

/// Incremental writer for per-fit results.
pub struct RecordCsvWriter {
    writer: csv::Writer<File>,
    rows: usize,
}

impl RecordCsvWriter {
    pub fn create(path: &Path) -> Result<Self, AppError> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
        writer
            .write_record(["size", "subset", "features", "coefficients", "mse", "aic", "degenerate"])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append every successful fit in `batch`.
    pub fn write_batch(&mut self, batch: &SizeBatch, dataset: &Dataset) -> Result<(), AppError> {
        for record in batch.records() {
            let subset = join(record.subset.iter().map(usize::to_string));
            let features = join(dataset.subset_labels(&record.subset).into_iter());
            let coefficients = join(record.coefficients.iter().map(|c| format!("{c:.10}")));
            self.writer
                .write_record([
                    record.size().to_string(),
                    subset,
                    features,
                    coefficients,
                    format!("{:.10}", record.mse),
                    format!("{:.10}", record.aic),
                    record.degenerate.to_string(),
                ])
                .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Flush and return the number of rows written.
    pub fn finish(mut self) -> Result<usize, AppError> {
        self.writer
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
        Ok(self.rows)
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

/// Write the sweep summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Write a dataset in the ingest layout: target first, then features.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset, target_name: &str) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create dataset CSV '{}': {e}", path.display())))?;

    let mut header = vec![target_name.to_string()];
    header.extend((0..dataset.feature_count()).map(|i| {
        dataset
            .feature_name(i)
            .map_or_else(|| format!("x{i}"), str::to_string)
    }));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write dataset CSV header: {e}")))?;

    for (row, y) in dataset.rows().iter().zip(dataset.target()) {
        let mut fields = Vec::with_capacity(row.len() + 1);
        fields.push(y.to_string());
        fields.extend(row.iter().map(f64::to_string));
        writer
            .write_record(&fields)
            .map_err(|e| AppError::new(2, format!("Failed to write dataset CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush dataset CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SyntheticOptions, generate_linear_dataset};
    use crate::domain::SearchConfig;
    use crate::fit::SearchCoordinator;
    use crate::io::ingest::{IngestOptions, load_dataset};

    #[test]
    fn dataset_csv_round_trips_through_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synthetic.csv");
        let ds = generate_linear_dataset(&SyntheticOptions::default()).unwrap();

        write_dataset_csv(&path, &ds, "y").unwrap();
        let loaded = load_dataset(&path, &IngestOptions::default()).unwrap();

        assert_eq!(loaded.target_name, "y");
        assert_eq!(loaded.dataset.rows(), ds.rows());
        assert_eq!(loaded.dataset.target(), ds.target());
        assert_eq!(loaded.dataset.feature_name(3), Some("x3"));
    }

    #[test]
    fn record_writer_emits_one_row_per_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fits.csv");
        let ds = generate_linear_dataset(&SyntheticOptions::default()).unwrap();

        let mut writer = RecordCsvWriter::create(&path).unwrap();
        let mut result = Ok(());
        SearchCoordinator::new(&ds, SearchConfig::default())
            .unwrap()
            .run(|batch| {
                if result.is_ok() {
                    result = writer.write_batch(&batch, &ds);
                }
            })
            .unwrap();
        result.unwrap();
        assert_eq!(writer.finish().unwrap(), 22);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("size,subset,features,coefficients,mse,aic,degenerate")
        );
        assert_eq!(lines.count(), 22);
        assert!(text.contains("4,0 1 2 3,x0 x1 x2 x3,"));
    }
}
