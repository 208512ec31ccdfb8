//! Per-feature standardisation to zero mean and unit variance.

use agri_core::math::{mean, population_std};
use agri_core::types::ComputationError;

/// Standardisation parameters fixed at fit time.
///
/// Scales are population standard deviations over the fitting set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit on column-major `columns`, naming features in error messages.
    ///
    /// # Errors
    ///
    /// `ZeroVariance` when a feature is constant (or empty) over the fitting set.
    pub fn fit(columns: &[Vec<f64>], names: &[String]) -> Result<Self, ComputationError> {
        if columns.len() != names.len() {
            return Err(ComputationError::DimensionMismatch {
                expected: names.len(),
                got: columns.len(),
            });
        }
        let mut means = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());
        for (column, name) in columns.iter().zip(names) {
            let (Some(m), Some(s)) = (mean(column), population_std(column)) else {
                return Err(ComputationError::ZeroVariance {
                    feature: name.clone(),
                });
            };
            if !(s.is_finite() && s > 0.0) {
                return Err(ComputationError::ZeroVariance {
                    feature: name.clone(),
                });
            }
            means.push(m);
            scales.push(s);
        }
        Ok(Self { means, scales })
    }

    /// Rebuild from stored parameters.
    pub fn from_parts(means: Vec<f64>, scales: Vec<f64>) -> Result<Self, ComputationError> {
        if means.len() != scales.len() {
            return Err(ComputationError::DimensionMismatch {
                expected: means.len(),
                got: scales.len(),
            });
        }
        Ok(Self { means, scales })
    }

    /// Feature means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Feature scales.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Check if the scaler holds no features.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Standardise one value of feature `index`.
    #[inline]
    pub fn transform_value(&self, index: usize, value: f64) -> f64 {
        (value - self.means[index]) / self.scales[index]
    }

    /// Standardise column-major data.
    pub fn transform(&self, columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
        columns
            .iter()
            .enumerate()
            .map(|(j, column)| column.iter().map(|v| self.transform_value(j, *v)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("x{i}")).collect()
    }

    #[test]
    fn test_fit_transform_zero_mean_unit_variance() {
        let cols = vec![vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 30.0, 20.0, 40.0]];
        let scaler = StandardScaler::fit(&cols, &names(2)).unwrap();
        for z in scaler.transform(&cols) {
            assert_relative_eq!(mean(&z).unwrap(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(population_std(&z).unwrap(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_feature_rejected() {
        let cols = vec![vec![1.0, 2.0, 3.0], vec![5.0, 5.0, 5.0]];
        let err = StandardScaler::fit(&cols, &names(2)).unwrap_err();
        assert_eq!(
            err,
            ComputationError::ZeroVariance {
                feature: "x1".to_string()
            }
        );
    }

    #[test]
    fn test_transform_uses_fit_parameters() {
        let scaler = StandardScaler::from_parts(vec![800.0], vec![50.0]).unwrap();
        assert_relative_eq!(scaler.transform_value(0, 900.0), 2.0, epsilon = 1e-12);
    }
}
