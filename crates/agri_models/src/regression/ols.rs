//! Ordinary least squares with an intercept.

use agri_core::math::{mean, solve_normal_equations};
use agri_core::types::ComputationError;

/// Fitted linear model `y = intercept + Σ coefficients[j] · x[j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    /// Build from known parameters.
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Least-squares fit on column-major `columns`.
    ///
    /// Features and target are centred before solving, which keeps the
    /// normal equations well conditioned for raw inputs such as calendar
    /// years; the intercept is recovered from the means.
    ///
    /// # Examples
    ///
    /// ```
    /// use agri_models::regression::LinearModel;
    ///
    /// let x = vec![vec![2000.0, 2001.0, 2002.0, 2003.0]];
    /// let y = vec![5.0, 3.0, 1.0, -1.0];
    /// let model = LinearModel::fit(&x, &y).unwrap();
    /// assert!((model.coefficients()[0] + 2.0).abs() < 1e-9);
    /// assert!((model.predict_row(&[2004.0]) + 3.0).abs() < 1e-6);
    /// ```
    pub fn fit(columns: &[Vec<f64>], y: &[f64]) -> Result<Self, ComputationError> {
        let n_params = columns.len() + 1;
        if y.len() < n_params {
            return Err(ComputationError::InsufficientObservations {
                got: y.len(),
                need: n_params,
            });
        }

        let y_mean = mean(y).unwrap_or_default();
        let mut x_means = Vec::with_capacity(columns.len());
        let mut centred = Vec::with_capacity(columns.len());
        for column in columns {
            let m = mean(column).unwrap_or_default();
            x_means.push(m);
            centred.push(column.iter().map(|v| v - m).collect::<Vec<_>>());
        }
        let y_centred: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let coefficients = solve_normal_equations(&centred, &y_centred)?;
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_means)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    /// Intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficients in feature order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Prediction for one observation.
    #[inline]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }

    /// Predictions for column-major data.
    pub fn predict(&self, columns: &[Vec<f64>]) -> Vec<f64> {
        let n_rows = columns.first().map_or(0, Vec::len);
        let mut row = vec![0.0; columns.len()];
        (0..n_rows)
            .map(|i| {
                for (j, column) in columns.iter().enumerate() {
                    row[j] = column[i];
                }
                self.predict_row(&row)
            })
            .collect()
    }
}
