//! Fitting routine for a single feature subset.
//!
//! Given:
//! - the observation rows
//! - the target vector
//! - one feature subset
//!
//! we build the design matrix, solve the normal equations, predict every row and
//! score the fit. Non-finite coefficients are not an error: they flow through to
//! the scores and set the record's `degenerate` flag.

use nalgebra::DVector;

use crate::domain::FitRecord;
use crate::error::FitError;
use crate::fit::scoring::{aic, mse};
use crate::math::solve_normal_equations;
use crate::models::{build_design_matrix, fill_design_row, predict};

/// Fit one subset and score it.
pub fn fit_subset(rows: &[Vec<f64>], target: &[f64], subset: &[usize]) -> Result<FitRecord, FitError> {
    if subset.is_empty() {
        return Err(FitError::EmptySubset);
    }
    if rows.len() != target.len() {
        return Err(FitError::TargetLength {
            rows: rows.len(),
            targets: target.len(),
        });
    }

    let x = build_design_matrix(rows, subset)?;
    let y = DVector::from_column_slice(target);
    let coefficients: Vec<f64> = solve_normal_equations(&x, &y).iter().copied().collect();

    let mut row = vec![0.0; subset.len() + 1];
    let mut predictions = Vec::with_capacity(rows.len());
    for obs in rows {
        fill_design_row(obs, subset, &mut row)?;
        predictions.push(predict(&row, &coefficients));
    }

    let mse = mse(target, &predictions);
    let aic = aic(mse, subset.len(), rows.len());

    Ok(FitRecord::new(subset.to_vec(), coefficients, mse, aic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SyntheticOptions, generate_linear_dataset};

    #[test]
    fn recovers_exact_linear_combination() {
        let opts = SyntheticOptions {
            rows: 40,
            features: 6,
            active: vec![(0, 1.5), (2, -2.0), (3, 0.75), (5, 4.0)],
            intercept: 3.0,
            noise_sd: 0.0,
            seed: 7,
        };
        let ds = generate_linear_dataset(&opts).unwrap();

        let fit = fit_subset(ds.rows(), ds.target(), &[0, 2, 3, 5]).unwrap();
        let want = [1.5, -2.0, 0.75, 4.0, 3.0];
        assert_eq!(fit.coefficients.len(), want.len());
        for (got, want) in fit.coefficients.iter().zip(want) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert!(fit.mse < 1e-12);
        assert!(!fit.degenerate);
        assert_eq!(fit.intercept().map(|c| (c - 3.0).abs() < 1e-9), Some(true));
    }

    #[test]
    fn superset_of_true_features_still_fits_exactly() {
        let opts = SyntheticOptions {
            rows: 30,
            features: 5,
            active: vec![(1, 2.0), (4, -1.0)],
            intercept: 0.5,
            noise_sd: 0.0,
            seed: 11,
        };
        let ds = generate_linear_dataset(&opts).unwrap();

        let fit = fit_subset(ds.rows(), ds.target(), &[0, 1, 3, 4]).unwrap();
        assert!(fit.mse < 1e-12);
        assert!(fit.coefficients[0].abs() < 1e-8);
        assert!((fit.coefficients[1] - 2.0).abs() < 1e-8);
    }

    #[test]
    fn invalid_index_is_a_local_error() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let err = fit_subset(&rows, &[1.0, 2.0], &[0, 2]).unwrap_err();
        assert!(matches!(err, FitError::InvalidIndex { index: 2, .. }));
    }

    #[test]
    fn collinear_subset_is_reported_as_degenerate() {
        let rows: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let t = i as f64;
                vec![t, 2.0 * t, t * t, 1.0]
            })
            .collect();
        let target: Vec<f64> = (0..8).map(|i| i as f64 * 3.0 + 1.0).collect();

        let fit = fit_subset(&rows, &target, &[0, 1, 2, 3]).unwrap();
        assert_eq!(fit.coefficients.len(), 5);
        assert!(fit.degenerate);
    }
}
