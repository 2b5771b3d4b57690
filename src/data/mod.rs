//! Data sources that do not come from a CSV file.

pub mod synthetic;

pub use synthetic::*;
