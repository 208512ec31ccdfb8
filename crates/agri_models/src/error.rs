//! Error types for generation and modelling.

use agri_core::types::{ComputationError, DataError};
use thiserror::Error;

/// Errors raised while generating synthetic series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// More shock periods were requested than the series has periods.
    #[error("Cannot place {requested} distinct shocks in {periods} periods")]
    TooManyShocks {
        /// Number of shock periods requested
        requested: usize,
        /// Number of periods available
        periods: usize,
    },

    /// A discrete shock was requested without any magnitude to draw from.
    #[error("Shock magnitude choices are empty")]
    EmptyShockChoices,

    /// A process parameter is out of its admissible range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Dotted parameter path (e.g. `soil.noise_std`)
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Dataset assembly failed.
    #[error(transparent)]
    Data(#[from] DataError),
}

impl SimulationError {
    /// Create an invalid parameter error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while fitting or applying the yield response model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A feature the model requires is absent from the dataset.
    #[error("Required model feature '{feature}' is missing from the dataset")]
    MissingFeature {
        /// Feature name
        feature: String,
    },

    /// The feature list is empty.
    #[error("Model requires at least one feature")]
    NoFeatures,

    /// A feature name appears twice.
    #[error("Duplicate model feature: {0}")]
    DuplicateFeature(String),

    /// Feature names, scaler and coefficients disagree in length.
    #[error("Inconsistent model bundle: {features} features, {scaler} scaler entries, {coefficients} coefficients")]
    InconsistentBundle {
        /// Number of feature names
        features: usize,
        /// Number of standardisation entries
        scaler: usize,
        /// Number of fitted coefficients
        coefficients: usize,
    },

    /// Dataset access failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Numerical failure during fit or prediction.
    #[error(transparent)]
    Computation(#[from] ComputationError),
}

impl ModelError {
    /// Translate a missing-column lookup into a missing-feature error.
    pub(crate) fn from_lookup(err: DataError) -> Self {
        match err {
            DataError::MissingColumn(feature) => Self::MissingFeature { feature },
            other => Self::Data(other),
        }
    }
}
