//! CLI error types.

use agri_models::{ModelError, SimulationError};
use agri_scenarios::ScenarioError;
use infra_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `agritrend` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Historical generation failed.
    #[error("Generation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// Model fitting or scoring failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Projection or scenario evaluation failed.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Reading or writing tables failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
