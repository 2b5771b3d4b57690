//! Mathematical utilities: subset enumeration and the normal-equations solver.

pub mod combinations;
pub mod ols;

pub use combinations::*;
pub use ols::*;
