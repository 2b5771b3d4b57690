//! Linear model primitives.
//!
//! Kept as small, pure functions so that fitting/search code can stay generic.

pub mod design;

pub use design::*;
