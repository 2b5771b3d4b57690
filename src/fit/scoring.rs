//! Fit scores.
//!
//! - `mse` = mean of squared residuals
//! - `aic` = `n * (1 + 2 * vars) * (mse / n)`
//!
//! The `aic` score is not the textbook Akaike criterion. It is kept as the
//! ranking score used by the sweep so results stay comparable with earlier runs.

pub use crate::models::predict;

/// Mean squared error between `actual` and `predicted`.
///
/// Returns `NaN` for empty inputs.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "mse inputs differ in length");
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let r = a - p;
            r * r
        })
        .sum();
    sse / actual.len() as f64
}

/// Information-style score for a fit with `num_vars` features on `num_obs` rows.
pub fn aic(mse: f64, num_vars: usize, num_obs: usize) -> f64 {
    let n = num_obs as f64;
    n * (1.0 + 2.0 * num_vars as f64) * (mse / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_is_zero_on_perfect_fit() {
        let a = [1.5, -2.0, 3.25, 0.0];
        assert_eq!(mse(&a, &a), 0.0);
    }

    #[test]
    fn mse_is_non_negative() {
        let a = [1.0, 2.0, 3.0];
        let p = [3.0, -2.0, 3.5];
        let v = mse(&a, &p);
        assert!(v >= 0.0);
        assert!((v - (4.0 + 16.0 + 0.25) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn aic_matches_reference_value() {
        assert!((aic(2.0, 3, 10) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn aic_grows_with_variable_count() {
        assert!(aic(1.0, 5, 50) > aic(1.0, 4, 50));
    }
}
