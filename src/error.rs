//! Error types.
//!
//! - `AppError` is what the binary reports: a message plus a process exit code.
//! - `FitError` is the structural error raised by the fitting core. Inside a sweep
//!   it is local to one subset; at sweep entry it aborts the run.

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Input-contract violations detected while building or fitting a subset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("Feature index {index} is out of range for {feature_count} features.")]
    InvalidIndex { index: usize, feature_count: usize },

    #[error("Row {row} has {found} values, expected {expected}.")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Target has {targets} values but the observation matrix has {rows} rows.")]
    TargetLength { rows: usize, targets: usize },

    #[error("Feature subset is empty.")]
    EmptySubset,
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(2, format!("Invalid dataset: {err}"))
    }
}
