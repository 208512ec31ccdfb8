//! Error types for structured error handling.
//!
//! This module provides:
//! - `DataError`: Errors from dataset construction and column lookup
//! - `ComputationError`: Errors from numerical routines (standardisation,
//!   linear solves, predictions)

use thiserror::Error;

/// Dataset shape and lookup errors.
///
/// # Examples
/// ```
/// use agri_core::types::DataError;
///
/// let err = DataError::MissingColumn("soil_index".to_string());
/// assert_eq!(format!("{}", err), "Missing column: soil_index");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A series does not match the dataset's period count.
    #[error("Column '{column}' has {got} values, expected {expected}")]
    LengthMismatch {
        /// Column being inserted
        column: String,
        /// Number of periods in the dataset
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// A required column is absent.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column with this name already exists.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// The year index is not contiguous and increasing.
    #[error("Year index not contiguous at position {index}: expected {expected}, got {got}")]
    NonContiguousYears {
        /// Position of the offending entry
        index: usize,
        /// Expected year
        expected: i32,
        /// Year found
        got: i32,
    },

    /// The name does not identify a known factor.
    #[error("Unknown factor: {0}")]
    UnknownFactor(String),

    /// The dataset has no periods.
    #[error("Dataset has no periods")]
    Empty,
}

/// Numerical failures.
///
/// Raised instead of letting NaN or infinity flow into downstream tables.
///
/// # Examples
/// ```
/// use agri_core::types::ComputationError;
///
/// let err = ComputationError::ZeroVariance { feature: "year".to_string() };
/// assert!(format!("{}", err).contains("zero variance"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    /// A value became NaN or infinite.
    #[error("Non-finite value {value} in '{column}' for year {year}")]
    NonFinite {
        /// Column or feature name
        column: String,
        /// Period in which the value appeared
        year: i32,
        /// The offending value
        value: f64,
    },

    /// A feature is constant over the fitting set and cannot be standardised.
    #[error("Feature '{feature}' has zero variance over the fitting set")]
    ZeroVariance {
        /// Feature name
        feature: String,
    },

    /// The normal equations are not positive definite.
    #[error("Design matrix is singular or not positive definite")]
    SingularSystem,

    /// Too few observations for the requested fit.
    #[error("Insufficient observations: got {got}, need at least {need}")]
    InsufficientObservations {
        /// Number of observations supplied
        got: usize,
        /// Minimum required
        need: usize,
    },

    /// Matrix and vector dimensions disagree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = DataError::LengthMismatch {
            column: "rainfall_mm".to_string(),
            expected: 25,
            got: 24,
        };
        assert_eq!(
            err.to_string(),
            "Column 'rainfall_mm' has 24 values, expected 25"
        );
    }

    #[test]
    fn test_non_finite_names_column_and_year() {
        let err = ComputationError::NonFinite {
            column: "fertilizer_kg_ha".to_string(),
            year: 2031,
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("fertilizer_kg_ha"));
        assert!(msg.contains("2031"));
    }

    #[test]
    fn test_non_contiguous_display() {
        let err = DataError::NonContiguousYears {
            index: 3,
            expected: 2003,
            got: 2005,
        };
        assert!(err.to_string().contains("expected 2003, got 2005"));
    }
}
