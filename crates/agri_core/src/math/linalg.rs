//! Dense linear algebra for small least-squares problems.
//!
//! Feature counts are single digits, so plain `Vec<Vec<f64>>` storage and
//! an O(n³) Cholesky factorisation are sufficient.

use crate::types::ComputationError;

const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve `(XᵀX) β = Xᵀy` for column-major `columns` of X.
///
/// # Errors
///
/// - `DimensionMismatch` when a column length differs from `y`
/// - `InsufficientObservations` when there are fewer rows than columns
/// - `SingularSystem` when `XᵀX` is not positive definite
///
/// # Examples
/// ```
/// use agri_core::math::solve_normal_equations;
///
/// // y = 2·x0 + 3·x1
/// let x0 = vec![1.0, 0.0, 1.0, 2.0];
/// let x1 = vec![0.0, 1.0, 1.0, 1.0];
/// let y: Vec<f64> = x0.iter().zip(&x1).map(|(a, b)| 2.0 * a + 3.0 * b).collect();
///
/// let beta = solve_normal_equations(&[x0, x1], &y).unwrap();
/// assert!((beta[0] - 2.0).abs() < 1e-10);
/// assert!((beta[1] - 3.0).abs() < 1e-10);
/// ```
pub fn solve_normal_equations(
    columns: &[Vec<f64>],
    y: &[f64],
) -> Result<Vec<f64>, ComputationError> {
    let n_params = columns.len();
    let n_obs = y.len();

    for column in columns {
        if column.len() != n_obs {
            return Err(ComputationError::DimensionMismatch {
                expected: n_obs,
                got: column.len(),
            });
        }
    }
    if n_obs < n_params {
        return Err(ComputationError::InsufficientObservations {
            got: n_obs,
            need: n_params,
        });
    }

    // XᵀX
    let mut xtx = vec![vec![0.0; n_params]; n_params];
    for i in 0..n_params {
        for j in 0..=i {
            let sum: f64 = columns[i].iter().zip(&columns[j]).map(|(a, b)| a * b).sum();
            xtx[i][j] = sum;
            xtx[j][i] = sum;
        }
    }

    // Xᵀy
    let xty: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().zip(y).map(|(a, b)| a * b).sum())
        .collect();

    solve_cholesky(&xtx, &xty)
}

/// Solve `A x = b` for symmetric positive-definite `A`.
pub fn solve_cholesky(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, ComputationError> {
    let n = b.len();
    if a.len() != n {
        return Err(ComputationError::DimensionMismatch {
            expected: n,
            got: a.len(),
        });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // A = L Lᵀ
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                // Relative pivot floor catches exact collinearity lost to rounding
                if !sum.is_finite() || sum <= a[i][i].abs() * PIVOT_TOLERANCE {
                    return Err(ComputationError::SingularSystem);
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Lᵀ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Ok(x)
}
