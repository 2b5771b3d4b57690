//! Ordinary least squares via the normal equations.
//!
//! Each subset fit solves
//!
//! ```text
//! minimize ||X c - y||^2
//! ```
//!
//! by forming `(XᵀX) c = Xᵀy` and running Gaussian elimination followed by back
//! substitution. There is no pivoting and no singularity check: a (near-)zero
//! diagonal entry produces non-finite coefficients, which are returned as-is.
//! The systems are tiny (`k + 1` unknowns) and solved once per subset, so the
//! scratch matrices live only for the duration of one call.

use nalgebra::{DMatrix, DVector};

/// Solve the least-squares problem for design matrix `x` and target `y`.
///
/// The result has one entry per column of `x`.
///
/// # Panics
/// Panics if `x.nrows() != y.len()`. Callers build `x` from the same rows as `y`.
pub fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> DVector<f64> {
    let (xtx, xty) = normal_equations(x, y);
    gaussian_elimination(xtx, xty)
}

/// Build `XᵀX` (symmetric, `p × p`) and `Xᵀy` (length `p`).
pub fn normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> (DMatrix<f64>, DVector<f64>) {
    assert_eq!(x.nrows(), y.len(), "design rows and target length differ");
    let p = x.ncols();

    let mut xtx = DMatrix::<f64>::zeros(p, p);
    for j in 0..p {
        let col_j = x.column(j);
        for k in 0..p {
            xtx[(j, k)] = col_j.dot(&x.column(k));
        }
    }

    let mut xty = DVector::<f64>::zeros(p);
    for j in 0..p {
        xty[j] = x.column(j).dot(y);
    }

    (xtx, xty)
}

/// Solve the square system `a · c = b` in place, without pivoting.
///
/// Forward elimination removes column `i` from every row below `i` using the
/// factor `a[j][i] / a[i][i]` (applied to `b` as well); back substitution then
/// solves from the last unknown to the first.
pub fn gaussian_elimination(mut a: DMatrix<f64>, mut b: DVector<f64>) -> DVector<f64> {
    let n = b.len();
    debug_assert_eq!(a.nrows(), n);
    debug_assert_eq!(a.ncols(), n);

    for i in 0..n {
        for j in (i + 1)..n {
            let factor = a[(j, i)] / a[(i, i)];
            for k in i..n {
                a[(j, k)] -= factor * a[(i, k)];
            }
            b[j] -= factor * b[i];
        }
    }

    let mut c = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut acc = b[i];
        for j in (i + 1)..n {
            acc -= a[(i, j)] * c[j];
        }
        c[i] = acc / a[(i, i)];
    }

    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 3x + 2 on x = [0,1,2], intercept column last.
        let x = DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 1.0, 1.0, 2.0, 1.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let c = solve_normal_equations(&x, &y);
        assert!((c[0] - 3.0).abs() < 1e-10);
        assert!((c[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn normal_equations_are_symmetric() {
        let x = DMatrix::from_row_slice(4, 3, &[
            1.0, 2.0, 1.0, //
            0.5, -1.0, 1.0, //
            3.0, 0.0, 1.0, //
            -2.0, 4.0, 1.0,
        ]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);
        let (xtx, xty) = normal_equations(&x, &y);

        assert_eq!(xtx.shape(), (3, 3));
        for j in 0..3 {
            for k in 0..3 {
                assert_eq!(xtx[(j, k)], xtx[(k, j)]);
            }
        }
        // Intercept column: XᵀX[2][2] is the row count and Xᵀy[2] the target sum.
        assert_eq!(xtx[(2, 2)], 4.0);
        assert_eq!(xty[2], 10.0);
    }

    #[test]
    fn elimination_solves_square_system() {
        // 2a + b = 5, a + 3b = 10  =>  a = 1, b = 3
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[5.0, 10.0]);
        let c = gaussian_elimination(a, b);
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_columns_give_non_finite_coefficients() {
        // Second column duplicates the first: XᵀX is exactly singular.
        let x = DMatrix::from_row_slice(3, 3, &[
            1.0, 1.0, 1.0, //
            2.0, 2.0, 1.0, //
            3.0, 3.0, 1.0,
        ]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let c = solve_normal_equations(&x, &y);
        assert_eq!(c.len(), 3);
        assert!(c.iter().any(|v| !v.is_finite()));
    }
}
