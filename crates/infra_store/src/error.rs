//! Storage error types.

use std::path::PathBuf;

use agri_core::types::DataError;
use thiserror::Error;

/// Errors raised while persisting or restoring tables.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The first header is not the period column.
    #[error("First column must be 'year', found '{0}'")]
    MissingYearColumn(String),

    /// A cell could not be parsed as a number.
    #[error("Line {line}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        /// 1-based line number including the header
        line: usize,
        /// Column name
        column: String,
        /// Raw cell content
        value: String,
    },

    /// A row has the wrong number of cells.
    #[error("Line {line}: expected {expected} fields, found {got}")]
    RowWidth {
        /// 1-based line number including the header
        line: usize,
        /// Header width
        expected: usize,
        /// Row width
        got: usize,
    },

    /// The restored table is not a valid dataset.
    #[error(transparent)]
    Data(#[from] DataError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
