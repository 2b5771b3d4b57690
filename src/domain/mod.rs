//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated input (`Dataset`)
//! - sweep configuration (`SearchConfig`, `Dispatch`)
//! - fit outputs (`FitRecord`, `SubsetOutcome`, `SizeBatch`, `SearchSummary`)

pub mod types;

pub use types::*;
