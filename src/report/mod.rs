//! Reporting utilities: formatted terminal output for fits, sweeps and trials.

pub mod format;

pub use format::*;
