//! Serde-driven tables (coefficients, comparisons).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Write one CSV row per record, with a header taken from field names.
pub fn write_records<T, W>(records: &[T], writer: W) -> StoreResult<()>
where
    T: Serialize,
    W: Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save records to `path`, creating or truncating the file.
pub fn save_records<T: Serialize>(records: &[T], path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    write_records(records, file)?;
    debug!(path = %path.display(), rows = records.len(), "records saved");
    Ok(())
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: impl AsRef<Path>) -> StoreResult<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        factor: &'static str,
        impact: f64,
    }

    #[test]
    fn test_header_from_fields() {
        let rows = [
            Row {
                factor: "rainfall_mm",
                impact: 2.5,
            },
            Row {
                factor: "year",
                impact: -15.0,
            },
        ];
        let mut buf = Vec::new();
        write_records(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "factor,impact\nrainfall_mm,2.5\nyear,-15.0\n");
    }
}
