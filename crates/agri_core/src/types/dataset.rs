//! Column-aligned, year-indexed datasets.
//!
//! A [`Dataset`] owns a contiguous run of calendar years and an ordered set
//! of named [`FactorSeries`], each exactly one value per year. Column order
//! is insertion order and is preserved by every operation.

use std::borrow::Cow;

use super::error::DataError;
use super::factor::{FactorKind, YEAR_COLUMN};

/// A named sequence of values aligned one-to-one with a dataset's years.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorSeries {
    name: String,
    values: Vec<f64>,
}

impl FactorSeries {
    /// Create a new series.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a series named after a factor's column.
    pub fn for_factor(factor: FactorKind, values: Vec<f64>) -> Self {
        Self::new(factor.column_name(), values)
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in year order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

/// Ordered mapping from column name to series, sharing one year index.
///
/// # Invariants
///
/// - Years are contiguous and strictly increasing by one.
/// - Every series has exactly `years().len()` values.
/// - Column names are unique and never equal to `"year"`.
///
/// # Examples
/// ```
/// use agri_core::types::{Dataset, FactorSeries};
///
/// let mut ds = Dataset::with_start_year(2025, 2);
/// ds.push_series(FactorSeries::new("soil_index", vec![0.70, 0.69])).unwrap();
///
/// assert!(ds.push_series(FactorSeries::new("irrigation_pct", vec![40.0])).is_err());
/// assert_eq!(ds.last_year(), Some(2026));
/// assert_eq!(ds.feature_values("year").unwrap().as_ref(), &[2025.0, 2026.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    years: Vec<i32>,
    columns: Vec<FactorSeries>,
}

impl Dataset {
    /// Create an empty-column dataset covering `n_periods` years from `start_year`.
    pub fn with_start_year(start_year: i32, n_periods: usize) -> Self {
        Self {
            years: (0..n_periods).map(|i| start_year + i as i32).collect(),
            columns: Vec::new(),
        }
    }

    /// Create an empty-column dataset from an explicit year index.
    ///
    /// # Errors
    ///
    /// `DataError::Empty` when no years are given and
    /// `DataError::NonContiguousYears` when a year does not follow its
    /// predecessor by exactly one.
    pub fn from_years(years: Vec<i32>) -> Result<Self, DataError> {
        let first = *years.first().ok_or(DataError::Empty)?;
        for (index, &year) in years.iter().enumerate() {
            let expected = first + index as i32;
            if year != expected {
                return Err(DataError::NonContiguousYears {
                    index,
                    expected,
                    got: year,
                });
            }
        }
        Ok(Self {
            years,
            columns: Vec::new(),
        })
    }

    /// Append a series.
    ///
    /// # Errors
    ///
    /// Fails when the length disagrees with the year index or the name is
    /// already taken.
    pub fn push_series(&mut self, series: FactorSeries) -> Result<(), DataError> {
        if series.name == YEAR_COLUMN || self.column(&series.name).is_some() {
            return Err(DataError::DuplicateColumn(series.name));
        }
        self.check_length(&series)?;
        self.columns.push(series);
        Ok(())
    }

    /// Replace a series of the same name, or append it when absent.
    pub fn set_series(&mut self, series: FactorSeries) -> Result<(), DataError> {
        if series.name == YEAR_COLUMN {
            return Err(DataError::DuplicateColumn(series.name));
        }
        self.check_length(&series)?;
        match self.columns.iter_mut().find(|c| c.name == series.name) {
            Some(existing) => *existing = series,
            None => self.columns.push(series),
        }
        Ok(())
    }

    fn check_length(&self, series: &FactorSeries) -> Result<(), DataError> {
        if series.len() != self.years.len() {
            return Err(DataError::LengthMismatch {
                column: series.name.clone(),
                expected: self.years.len(),
                got: series.len(),
            });
        }
        Ok(())
    }

    /// Year index.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Check if the dataset has no periods.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// First year, if any.
    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// Last year, if any.
    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// All series in column order.
    pub fn series(&self) -> &[FactorSeries] {
        &self.columns
    }

    /// Column names in order (excluding the year column).
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of a column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Mutable values of a column, if present.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.values.as_mut_slice())
    }

    /// Values of a column, failing when absent.
    pub fn require(&self, name: &str) -> Result<&[f64], DataError> {
        self.column(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Values of a factor's column, if present.
    pub fn factor(&self, factor: FactorKind) -> Option<&[f64]> {
        self.column(factor.column_name())
    }

    /// Values usable as a model feature.
    ///
    /// The year column is addressable by name and is returned as `f64`.
    pub fn feature_values(&self, name: &str) -> Result<Cow<'_, [f64]>, DataError> {
        if name == YEAR_COLUMN {
            return Ok(Cow::Owned(self.years.iter().map(|&y| y as f64).collect()));
        }
        self.require(name).map(Cow::Borrowed)
    }

    /// Copy of the dataset restricted to the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Dataset, DataError> {
        let mut out = Dataset {
            years: self.years.clone(),
            columns: Vec::with_capacity(names.len()),
        };
        for name in names {
            out.push_series(FactorSeries::new(*name, self.require(name)?.to_vec()))?;
        }
        Ok(out)
    }
}
