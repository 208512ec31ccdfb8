//! # agri_core: Foundation Layer for Yield Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! agri_core serves as the bottom layer of the workspace, providing:
//! - Factor identities, physical bounds and generation precision (`types::factor`)
//! - Column-aligned, year-indexed datasets (`types::dataset`)
//! - Error types: `DataError`, `ComputationError` (`types::error`)
//! - Descriptive statistics and a Cholesky linear solver (`math`)
//! - A seeded, explicitly threaded random source (`rng`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other agri_* crates, with minimal external dependencies:
//! - rand / rand_distr: Seeded pseudo-random generation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use agri_core::types::{Dataset, FactorKind, FactorSeries};
//!
//! let mut dataset = Dataset::with_start_year(2000, 3);
//! dataset
//!     .push_series(FactorSeries::new(FactorKind::Rainfall.column_name(), vec![810.0, 790.5, 802.1]))
//!     .unwrap();
//!
//! assert_eq!(dataset.years(), &[2000, 2001, 2002]);
//! assert_eq!(dataset.column("rainfall_mm").unwrap()[1], 790.5);
//!
//! let bounds = FactorKind::Irrigation.bounds().unwrap();
//! assert_eq!(bounds.clip(75.0), 70.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `FactorKind`, `PhysicalBounds` and `Dataset`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
