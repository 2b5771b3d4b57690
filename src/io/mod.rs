//! File input and output.
//!
//! - numeric CSV to `Dataset`, skipping and reporting bad rows (`ingest`)
//! - per-fit CSV, sweep summary JSON and synthetic dataset CSV (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
