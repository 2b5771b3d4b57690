//! Subset fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit and score a single subset (`fitter`, `scoring`)
//! - sweep every subset size on a bounded worker pool (`search`, `dispatch`)
//! - rank the resulting fits (`selection`)

pub mod dispatch;
pub mod fitter;
pub mod scoring;
pub mod search;
pub mod selection;

pub use dispatch::*;
pub use fitter::*;
pub use scoring::*;
pub use search::*;
pub use selection::*;
