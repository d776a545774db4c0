//! Ridge-penalized least squares solved through Cholesky decomposition.

use crate::error::{ComputeError, Result};

/// Solves `min ||X b - y||^2 + sum_j penalty_j * b_j^2` for `b`.
///
/// `rows` holds the design matrix row by row; every row must have
/// `penalties.len()` entries. The positive penalties keep the normal
/// equations positive definite even when the design itself is rank
/// deficient, which makes the solve total for every input the forecaster
/// produces.
pub(crate) fn solve_ridge(rows: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<Vec<f64>> {
    let width = penalties.len();

    // Normal equations: (X^T X + diag(penalties)) b = X^T y.
    let mut gram = vec![vec![0.0; width]; width];
    let mut rhs = vec![0.0; width];
    for (row, &target) in rows.iter().zip(y) {
        for j in 0..width {
            rhs[j] += row[j] * target;
            for k in j..width {
                gram[j][k] += row[j] * row[k];
            }
        }
    }
    for j in 0..width {
        gram[j][j] += penalties[j];
        for k in 0..j {
            gram[j][k] = gram[k][j];
        }
    }

    let lower = cholesky(&gram)?;
    let forward = solve_lower(&lower, &rhs);
    Ok(solve_lower_transposed(&lower, &forward))
}

/// Cholesky factorization `A = L L^T` of a symmetric positive definite
/// matrix.
fn cholesky(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut lower = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = matrix[i][j];
            for k in 0..j {
                sum -= lower[i][k] * lower[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(ComputeError::ForecastComputation(
                        "normal equations are not positive definite".to_string(),
                    ));
                }
                lower[i][j] = sum.sqrt();
            } else {
                lower[i][j] = sum / lower[j][j];
            }
        }
    }

    Ok(lower)
}

/// Forward substitution for `L z = b`.
fn solve_lower(lower: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = lower.len();
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= lower[i][k] * z[k];
        }
        z[i] = sum / lower[i][i];
    }
    z
}

/// Back substitution for `L^T x = z`.
fn solve_lower_transposed(lower: &[Vec<f64>], z: &[f64]) -> Vec<f64> {
    let n = lower.len();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= lower[k][i] * x[k];
        }
        x[i] = sum / lower[i][i];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual_norm(rows: &[Vec<f64>], y: &[f64], beta: &[f64]) -> f64 {
        rows.iter()
            .zip(y)
            .map(|(row, target)| {
                let fitted: f64 = row.iter().zip(beta).map(|(a, b)| a * b).sum();
                (target - fitted).powi(2)
            })
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn test_recovers_exact_solution_of_square_system() {
        // y = 2 + 3x sampled without noise; near-zero penalties leave the
        // least-squares solution untouched.
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 2.0 + 3.0 * i as f64).collect();

        let beta = solve_ridge(&rows, &y, &[1e-9, 1e-9]).unwrap();

        assert!((beta[0] - 2.0).abs() < 1e-6);
        assert!((beta[1] - 3.0).abs() < 1e-6);
        assert!(residual_norm(&rows, &y, &beta) < 1e-6);
    }

    #[test]
    fn test_penalty_shrinks_coefficients() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 2.0 + 3.0 * i as f64).collect();

        let loose = solve_ridge(&rows, &y, &[1e-9, 1e-9]).unwrap();
        let tight = solve_ridge(&rows, &y, &[1e-9, 100.0]).unwrap();

        assert!(tight[1].abs() < loose[1].abs());
    }

    #[test]
    fn test_rank_deficient_design_still_solves_with_penalties() {
        // Two identical columns are unsolvable by plain least squares; the
        // ridge term makes the system positive definite again.
        let rows: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64, i as f64]).collect();
        let y: Vec<f64> = (0..5).map(|i| 2.0 * i as f64).collect();

        let beta = solve_ridge(&rows, &y, &[0.1, 0.1]).unwrap();

        // Symmetry of the problem splits the weight evenly.
        assert!((beta[0] - beta[1]).abs() < 1e-9);
        assert!(residual_norm(&rows, &y, &beta) < 0.1);
    }

    #[test]
    fn test_singular_system_without_penalties_errors() {
        // Duplicate power-of-two columns cancel exactly during the
        // factorization, so the pivot hits zero.
        let rows = vec![vec![2.0, 2.0]; 4];
        let y = vec![1.0, 2.0, 3.0, 4.0];

        let result = solve_ridge(&rows, &y, &[0.0, 0.0]);
        assert!(matches!(
            result,
            Err(ComputeError::ForecastComputation(_))
        ));
    }
}
