//! Core data types for the yield simulation.
//!
//! This module provides:
//! - [`FactorKind`] and [`PhysicalBounds`]: variable identities and their clip intervals
//! - [`FactorSeries`] and [`Dataset`]: year-aligned columnar data
//! - [`DataError`] and [`ComputationError`]: structured failures

pub mod dataset;
pub mod error;
pub mod factor;

pub use dataset::{Dataset, FactorSeries};
pub use error::{ComputationError, DataError};
pub use factor::{
    round_to_decimals, FactorKind, PhysicalBounds, BASELINE_YIELD_COLUMN, SCENARIO_YIELD_COLUMN,
    YEAR_COLUMN,
};
