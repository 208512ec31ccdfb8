//! Driver attribution tables for the yield model.

use tracing::debug;

use super::bundle::{feature_matrix, ModelBundle};
use super::ols::LinearModel;
use crate::error::ModelError;
use agri_core::types::Dataset;

/// Unstandardised effect of one feature (target units per feature unit).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawCoefficient {
    /// Feature name
    pub factor: String,
    /// Change in yield per unit change in the feature
    pub impact_per_unit: f64,
}

/// Standardised effect of one feature and its share of the total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StandardizedImpact {
    /// Feature name
    pub factor: String,
    /// Change in yield per standard deviation of the feature
    pub standardized_impact: f64,
    /// `|standardized_impact|`
    pub absolute_impact: f64,
    /// Share of the summed absolute impacts, in percent
    pub relative_contribution_pct: f64,
}

/// Raw and standardised coefficient tables, in feature order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegressionAnalysis {
    raw_intercept: f64,
    raw: Vec<RawCoefficient>,
    standardized: Vec<StandardizedImpact>,
}

impl RegressionAnalysis {
    /// Build both tables for a fitted bundle.
    ///
    /// The standardised table reuses the bundle's coefficients; the raw table
    /// comes from a second least-squares fit on unstandardised features of
    /// the same dataset.
    pub fn new(bundle: &ModelBundle, dataset: &Dataset, target: &str) -> Result<Self, ModelError> {
        let raw_x = feature_matrix(dataset, bundle.features())?;
        let y = dataset.require(target).map_err(ModelError::from_lookup)?;
        let raw_model = LinearModel::fit(&raw_x, y)?;

        let raw = bundle
            .features()
            .iter()
            .zip(raw_model.coefficients())
            .map(|(factor, b)| RawCoefficient {
                factor: factor.clone(),
                impact_per_unit: *b,
            })
            .collect();

        let total: f64 = bundle
            .standardized_coefficients()
            .iter()
            .map(|b| b.abs())
            .sum();
        let standardized = bundle
            .features()
            .iter()
            .zip(bundle.standardized_coefficients())
            .map(|(factor, b)| StandardizedImpact {
                factor: factor.clone(),
                standardized_impact: *b,
                absolute_impact: b.abs(),
                relative_contribution_pct: if total > 0.0 {
                    b.abs() / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        debug!(features = bundle.features().len(), "Computed regression analysis");
        Ok(Self {
            raw_intercept: raw_model.intercept(),
            raw,
            standardized,
        })
    }

    /// Intercept of the unstandardised fit.
    pub fn raw_intercept(&self) -> f64 {
        self.raw_intercept
    }

    /// Raw coefficients.
    pub fn raw(&self) -> &[RawCoefficient] {
        &self.raw
    }

    /// Standardised impacts.
    pub fn standardized(&self) -> &[StandardizedImpact] {
        &self.standardized
    }

    /// The feature with the largest absolute standardised impact.
    pub fn dominant_factor(&self) -> Option<&StandardizedImpact> {
        self.standardized
            .iter()
            .max_by(|a, b| a.absolute_impact.total_cmp(&b.absolute_impact))
    }
}
