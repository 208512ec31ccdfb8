//! Delimited-text persistence of [`Dataset`]s.
//!
//! The header is `year` followed by every column in dataset order. Values
//! are written with their shortest round-trip representation, so a restored
//! dataset is bit-identical to the saved one.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use agri_core::types::{Dataset, FactorSeries, YEAR_COLUMN};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Write `dataset` as CSV to `writer`.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> StoreResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(dataset.series().len() + 1);
    header.push(YEAR_COLUMN);
    header.extend(dataset.column_names());
    csv.write_record(&header)?;

    let mut row = Vec::with_capacity(header.len());
    for (i, year) in dataset.years().iter().enumerate() {
        row.clear();
        row.push(year.to_string());
        for series in dataset.series() {
            row.push(series.values()[i].to_string());
        }
        csv.write_record(&row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Read a dataset from CSV produced by [`write_dataset`].
///
/// # Errors
///
/// - `MissingYearColumn` when the first header is not `year`
/// - `Parse` for a non-numeric cell, naming the line and column
/// - `Data` when years are not contiguous or the table has no rows
pub fn read_dataset<R: Read>(reader: R) -> StoreResult<Dataset> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let first = headers.get(0).unwrap_or_default();
    if first != YEAR_COLUMN {
        return Err(StoreError::MissingYearColumn(first.to_string()));
    }
    let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut years = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (idx, record) in csv.records().enumerate() {
        let record = record?;
        let line = idx + 2;
        if record.len() != headers.len() {
            return Err(StoreError::RowWidth {
                line,
                expected: headers.len(),
                got: record.len(),
            });
        }

        let year_cell = &record[0];
        let year = year_cell.parse::<i32>().map_err(|_| StoreError::Parse {
            line,
            column: YEAR_COLUMN.to_string(),
            value: year_cell.to_string(),
        })?;
        years.push(year);

        for (j, (cell, name)) in record.iter().skip(1).zip(&names).enumerate() {
            let value = cell.parse::<f64>().map_err(|_| StoreError::Parse {
                line,
                column: name.clone(),
                value: cell.to_string(),
            })?;
            columns[j].push(value);
        }
    }

    let mut dataset = Dataset::from_years(years)?;
    for (name, values) in names.into_iter().zip(columns) {
        dataset.push_series(FactorSeries::new(name, values))?;
    }
    Ok(dataset)
}

/// Save `dataset` to `path`, creating or truncating the file.
pub fn save_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    write_dataset(dataset, file)?;
    debug!(path = %path.display(), rows = dataset.len(), "dataset saved");
    Ok(())
}

/// Load a dataset from `path`.
pub fn load_dataset(path: impl AsRef<Path>) -> StoreResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let dataset = read_dataset(file)?;
    debug!(path = %path.display(), rows = dataset.len(), "dataset loaded");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::types::DataError;

    fn sample() -> Dataset {
        let mut ds = Dataset::with_start_year(2000, 3);
        ds.push_series(FactorSeries::new("rainfall_mm", vec![812.4, 790.1, 301.0]))
            .unwrap();
        ds.push_series(FactorSeries::new("soil_index", vec![0.72, 0.718, 0.713]))
            .unwrap();
        ds
    }

    #[test]
    fn test_header_and_rows() {
        let mut buf = Vec::new();
        write_dataset(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "year,rainfall_mm,soil_index");
        assert_eq!(lines[1], "2000,812.4,0.72");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_round_trip_in_memory() {
        let ds = sample();
        let mut buf = Vec::new();
        write_dataset(&ds, &mut buf).unwrap();
        assert_eq!(read_dataset(buf.as_slice()).unwrap(), ds);
    }

    #[test]
    fn test_rejects_missing_year_header() {
        let err = read_dataset("rainfall_mm\n800\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MissingYearColumn(ref h) if h == "rainfall_mm"));
    }

    #[test]
    fn test_parse_error_names_cell() {
        let err = read_dataset("year,soil_index\n2000,0.7\n2001,abc\n".as_bytes()).unwrap_err();
        match err {
            StoreError::Parse {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "soil_index");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_gap_in_years() {
        let err = read_dataset("year,x\n2000,1\n2002,2\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Data(DataError::NonContiguousYears { index: 1, .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = read_dataset("year,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Data(DataError::Empty)));
    }
}
