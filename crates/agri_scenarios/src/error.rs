//! Error types for projection and scenario evaluation.

use agri_core::types::DataError;
use agri_models::{ModelError, SimulationError};
use thiserror::Error;

/// Errors raised while projecting the baseline or applying interventions.
///
/// # Examples
/// ```
/// use agri_scenarios::ScenarioError;
///
/// let err = ScenarioError::InvalidRate {
///     factor: "soil".to_string(),
///     rate: 1.5,
///     reason: "must be below 1".to_string(),
/// };
/// assert!(err.to_string().contains("soil"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A rate would make its compounding multiplier non-positive or non-finite.
    #[error("Invalid rate {rate} for '{factor}': {reason}")]
    InvalidRate {
        /// Rate key
        factor: String,
        /// Offending rate
        rate: f64,
        /// Why the rate was rejected
        reason: String,
    },

    /// The projection horizon is empty.
    #[error("Projection horizon must be at least one period")]
    EmptyHorizon,

    /// A baseline is missing a column the engine needs.
    #[error("Baseline is missing column '{0}'")]
    MissingBaselineColumn(String),

    /// Model fitting or scoring failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A stochastic process could not be evaluated.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Dataset assembly failed.
    #[error(transparent)]
    Data(#[from] DataError),
}

