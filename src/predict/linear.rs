//! Least-squares linear regression.
//!
//! # Algorithm
//!
//! Ordinary least squares via the normal equations: build `XᵀX` and `Xᵀy`
//! (with an implicit intercept column) and solve with Gaussian elimination
//! and partial pivoting. The training sets in this crate are tiny synthetic
//! grids, so the dense solve is exact for all practical purposes.
//!
//! # Reference
//! Golub & Van Loan (2013), "Matrix Computations", Ch. 5.3

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pivot threshold below which the normal-equations system is treated
/// as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Model training failure. Raised only during initialization; scoring on a
/// fitted model is total.
#[derive(Debug, Clone, Error)]
pub enum TrainError {
    /// No training rows were supplied.
    #[error("training set is empty")]
    EmptyTrainingSet,
    /// A row's feature count differs from the first row's.
    #[error("inconsistent feature count in training row {0}")]
    RaggedRow(usize),
    /// The normal equations are singular (degenerate features).
    #[error("normal equations are singular")]
    Singular,
}

/// A fitted linear model: intercept plus one coefficient per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// `weights[0]` is the intercept; `weights[1..]` align with features.
    weights: Vec<f64>,
}

impl LinearModel {
    /// Fits a linear model to the given rows and targets.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Result<Self, TrainError> {
        if rows.is_empty() || rows.len() != targets.len() {
            return Err(TrainError::EmptyTrainingSet);
        }
        let features = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != features {
                return Err(TrainError::RaggedRow(i));
            }
        }

        // Normal equations over the intercept-augmented design matrix.
        let n = features + 1;
        let mut xtx = vec![vec![0.0_f64; n]; n];
        let mut xty = vec![0.0_f64; n];
        for (row, &y) in rows.iter().zip(targets) {
            let mut augmented = Vec::with_capacity(n);
            augmented.push(1.0);
            augmented.extend_from_slice(row);
            for (j, &xj) in augmented.iter().enumerate() {
                xty[j] += xj * y;
                for (k, &xk) in augmented.iter().enumerate() {
                    xtx[j][k] += xj * xk;
                }
            }
        }

        let weights = solve(&mut xtx, &mut xty)?;
        Ok(Self { weights })
    }

    /// Predicts the target for one feature vector.
    ///
    /// Features beyond the fitted count are ignored; missing features
    /// contribute nothing.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let (intercept, coefficients) = match self.weights.split_first() {
            Some((intercept, coefficients)) => (*intercept, coefficients),
            None => return 0.0,
        };
        intercept
            + coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    /// Fitted weights: intercept first, then one coefficient per feature.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Solves `a · x = b` in place with partial pivoting.
fn solve(a: &mut [Vec<f64>], b: &mut [f64]) -> Result<Vec<f64>, TrainError> {
    let n = b.len();
    for col in 0..n {
        // Pivot: largest absolute value in this column.
        let mut pivot = col;
        for row in (col + 1)..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(TrainError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = vec![0.0_f64; n];
    for col in (0..n).rev() {
        let mut sum = b[col];
        for k in (col + 1)..n {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_exact_line() {
        // y = 1 + 2x
        let rows = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let targets = vec![1.0, 3.0, 5.0, 7.0];
        let model = LinearModel::fit(&rows, &targets).unwrap();
        assert!((model.weights()[0] - 1.0).abs() < 1e-9);
        assert!((model.weights()[1] - 2.0).abs() < 1e-9);
        assert!((model.predict(&[10.0]) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_fits_multivariate_plane() {
        // y = 2 + 0.5a - 3b
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for a in [0.0, 1.0, 2.0, 4.0] {
            for b in [0.0, 1.0, 3.0] {
                rows.push(vec![a, b]);
                targets.push(2.0 + 0.5 * a - 3.0 * b);
            }
        }
        let model = LinearModel::fit(&rows, &targets).unwrap();
        assert!((model.weights()[0] - 2.0).abs() < 1e-9);
        assert!((model.weights()[1] - 0.5).abs() < 1e-9);
        assert!((model.weights()[2] + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_training_set() {
        assert!(matches!(
            LinearModel::fit(&[], &[]),
            Err(TrainError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![1.0]];
        let targets = vec![1.0, 2.0];
        assert!(matches!(
            LinearModel::fit(&rows, &targets),
            Err(TrainError::RaggedRow(1))
        ));
    }

    #[test]
    fn test_degenerate_features_singular() {
        // A constant feature duplicates the intercept column.
        let rows = vec![vec![1.0], vec![1.0], vec![1.0]];
        let targets = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            LinearModel::fit(&rows, &targets),
            Err(TrainError::Singular)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let rows = vec![vec![0.0], vec![1.0], vec![2.0]];
        let targets = vec![1.0, 3.0, 5.0];
        let model = LinearModel::fit(&rows, &targets).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let restored: LinearModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.predict(&[5.0]), model.predict(&[5.0]));
    }
}
