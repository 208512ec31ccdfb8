//! # infra_store: Tabular Persistence
//!
//! CSV storage for the simulation pipeline:
//! - `Dataset` round trips with a `year` column followed by each series
//! - Serde-driven writers for coefficient and comparison tables
//!
//! ## Usage Examples
//!
//! ```rust
//! use agri_core::types::{Dataset, FactorSeries};
//! use infra_store::{read_dataset, write_dataset};
//!
//! let mut dataset = Dataset::with_start_year(2000, 2);
//! dataset.push_series(FactorSeries::new("soil_index", vec![0.72, 0.717])).unwrap();
//!
//! let mut buffer = Vec::new();
//! write_dataset(&dataset, &mut buffer).unwrap();
//! assert_eq!(read_dataset(buffer.as_slice()).unwrap(), dataset);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod dataset_csv;
pub mod error;
mod records;

pub use dataset_csv::{load_dataset, read_dataset, save_dataset, write_dataset};
pub use error::{StoreError, StoreResult};
pub use records::{ensure_dir, save_records, write_records};
