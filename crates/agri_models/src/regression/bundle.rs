//! Fitted yield response model with its standardisation and feature order.

use std::collections::HashSet;

use agri_core::types::{ComputationError, Dataset, FactorKind, YEAR_COLUMN};
use tracing::debug;

use super::ols::LinearModel;
use super::scaler::StandardScaler;
use crate::error::ModelError;

/// Feature order of the yield model. Part of the [`ModelBundle`] contract.
pub const YIELD_FEATURES: [&str; 6] = [
    "rainfall_mm",
    "temperature_c",
    "soil_index",
    "irrigation_pct",
    "fertilizer_kg_ha",
    YEAR_COLUMN,
];

/// Column name used when a prediction itself is non-finite.
const PREDICTION_COLUMN: &str = "predicted_yield";

/// Immutable fitted predictor.
///
/// Holds the ordered feature names, the scaler fitted on the training set
/// and a linear model fitted on standardised inputs. Consumers select
/// features by name, so column order in the scored dataset does not matter.
///
/// # Examples
///
/// ```
/// use agri_core::types::{Dataset, FactorSeries};
/// use agri_models::regression::ModelBundle;
///
/// let mut ds = Dataset::with_start_year(2000, 5);
/// ds.push_series(FactorSeries::new("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
/// ds.push_series(FactorSeries::new("y", vec![3.0, 5.0, 7.0, 9.0, 11.0])).unwrap();
///
/// let bundle = ModelBundle::fit(&ds, &["x"], "y").unwrap();
/// let predicted = bundle.predict(&ds).unwrap();
/// assert!((predicted[4] - 11.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelBundle {
    features: Vec<String>,
    scaler: StandardScaler,
    model: LinearModel,
}

impl ModelBundle {
    /// Assemble a bundle from fitted parts, validating their consistency.
    ///
    /// # Errors
    ///
    /// - `NoFeatures` for an empty feature list
    /// - `DuplicateFeature` when a name repeats
    /// - `InconsistentBundle` when scaler or coefficient counts differ from
    ///   the feature count
    pub fn new(
        features: Vec<String>,
        scaler: StandardScaler,
        model: LinearModel,
    ) -> Result<Self, ModelError> {
        if features.is_empty() {
            return Err(ModelError::NoFeatures);
        }
        let mut seen = HashSet::with_capacity(features.len());
        for name in &features {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateFeature(name.clone()));
            }
        }
        if scaler.len() != features.len() || model.coefficients().len() != features.len() {
            return Err(ModelError::InconsistentBundle {
                features: features.len(),
                scaler: scaler.len(),
                coefficients: model.coefficients().len(),
            });
        }
        Ok(Self {
            features,
            scaler,
            model,
        })
    }

    /// Fit on `dataset`, standardising `features` and regressing `target`.
    pub fn fit(dataset: &Dataset, features: &[&str], target: &str) -> Result<Self, ModelError> {
        let names: Vec<String> = features.iter().map(|f| f.to_string()).collect();
        let raw = feature_matrix(dataset, &names)?;
        let y = dataset.require(target).map_err(ModelError::from_lookup)?;

        let scaler = StandardScaler::fit(&raw, &names)?;
        let model = LinearModel::fit(&scaler.transform(&raw), y)?;
        debug!(
            features = names.len(),
            observations = y.len(),
            intercept = model.intercept(),
            "Fitted standardised linear model"
        );
        Self::new(names, scaler, model)
    }

    /// Ordered feature names.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Standardisation fixed at fit time.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Model fitted on standardised features.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Standardised coefficients in feature order.
    pub fn standardized_coefficients(&self) -> &[f64] {
        self.model.coefficients()
    }

    /// Score every period of `dataset`.
    ///
    /// Features are looked up by name, standardised with the stored scaler
    /// and passed through the model once. Never refits.
    ///
    /// # Errors
    ///
    /// - `MissingFeature` when a declared feature is absent
    /// - `Computation(NonFinite)` naming the feature (or the prediction)
    ///   and the year when a value is NaN or infinite
    pub fn predict(&self, dataset: &Dataset) -> Result<Vec<f64>, ModelError> {
        let raw = feature_matrix(dataset, &self.features)?;
        let years = dataset.years();

        let standardized = self.scaler.transform(&raw);
        for (name, column) in self.features.iter().zip(&standardized) {
            check_finite(name, years, column)?;
        }

        let predictions = self.model.predict(&standardized);
        check_finite(PREDICTION_COLUMN, years, &predictions)?;
        Ok(predictions)
    }
}

/// Fit the yield model on a historical dataset using [`YIELD_FEATURES`].
pub fn fit_yield_model(historical: &Dataset) -> Result<ModelBundle, ModelError> {
    ModelBundle::fit(historical, &YIELD_FEATURES, FactorKind::Yield.column_name())
}

pub(crate) fn feature_matrix(
    dataset: &Dataset,
    features: &[String],
) -> Result<Vec<Vec<f64>>, ModelError> {
    features
        .iter()
        .map(|name| {
            dataset
                .feature_values(name)
                .map(|values| values.into_owned())
                .map_err(ModelError::from_lookup)
        })
        .collect()
}

fn check_finite(column: &str, years: &[i32], values: &[f64]) -> Result<(), ComputationError> {
    match values.iter().zip(years).find(|(v, _)| !v.is_finite()) {
        Some((value, year)) => Err(ComputationError::NonFinite {
            column: column.to_string(),
            year: *year,
            value: *value,
        }),
        None => Ok(()),
    }
}
