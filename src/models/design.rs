//! Design matrices for a feature subset.
//!
//! The fitter relies on two primitive operations:
//! - build a design row from an observation row and a subset (for OLS)
//! - predict a target value from a design row and coefficients (for scoring)
//!
//! The intercept is the constant `1` appended as the last column.

use nalgebra::DMatrix;

use crate::error::FitError;

/// Fill a design row: the subset's columns in subset order, then `1`.
///
/// # Panics
/// Panics if `out` does not have length `subset.len() + 1`.
pub fn fill_design_row(obs: &[f64], subset: &[usize], out: &mut [f64]) -> Result<(), FitError> {
    let k = subset.len();
    for (slot, &idx) in out[..k].iter_mut().zip(subset) {
        *slot = *obs.get(idx).ok_or(FitError::InvalidIndex {
            index: idx,
            feature_count: obs.len(),
        })?;
    }
    out[k] = 1.0;
    Ok(())
}

/// Project the observation matrix onto `subset` and append the intercept column.
///
/// The result has one row per observation and `subset.len() + 1` columns.
/// Fails if any subset index is outside a row's column range.
pub fn build_design_matrix(rows: &[Vec<f64>], subset: &[usize]) -> Result<DMatrix<f64>, FitError> {
    let p = subset.len() + 1;
    let mut x = DMatrix::<f64>::zeros(rows.len(), p);
    let mut row = vec![0.0; p];

    for (i, obs) in rows.iter().enumerate() {
        fill_design_row(obs, subset, &mut row)?;
        for (j, &v) in row.iter().enumerate() {
            x[(i, j)] = v;
        }
    }

    Ok(x)
}

/// Dot product of a design row and a coefficient vector.
pub fn predict(row: &[f64], coefficients: &[f64]) -> f64 {
    debug_assert_eq!(row.len(), coefficients.len());
    row.iter().zip(coefficients).map(|(x, c)| x * c).sum()
}
