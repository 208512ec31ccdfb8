//! # agri_models (L2: Models)
//!
//! Stochastic factor processes, the historical generator and the yield
//! response model.
//!
//! This crate provides:
//! - Random process primitives: trend plus noise, bounded random walk,
//!   discrete shocks and clipping (`processes`)
//! - Tunable process constants shared by generation and projection
//!   (`processes::ProcessParameters`)
//! - The seeded historical multi-factor generator (`generator`)
//! - Standardised least-squares fitting, the immutable `ModelBundle` and
//!   coefficient attribution tables (`regression`)
//!
//! ## Design Principles
//!
//! - **Explicit randomness**: every stochastic call takes `&mut SimRng`;
//!   there is no global random state
//! - **Clip after compose**: physical bounds apply after trend, noise and
//!   shocks are combined
//! - **Named features**: the model selects its inputs by name in a fixed,
//!   validated order
//!
//! ## Usage Examples
//!
//! ```rust
//! use agri_core::rng::SimRng;
//! use agri_models::generator::HistoricalSeriesGenerator;
//! use agri_models::regression::fit_yield_model;
//!
//! let mut rng = SimRng::from_seed(123);
//! let history = HistoricalSeriesGenerator::with_defaults()
//!     .generate(&mut rng)
//!     .unwrap();
//! let bundle = fit_yield_model(&history).unwrap();
//!
//! let fitted = bundle.predict(&history).unwrap();
//! assert_eq!(fitted.len(), history.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Deserialise `ProcessParameters` from configuration
//!   and serialise coefficient tables

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod generator;
pub mod processes;
pub mod regression;

pub use error::{ModelError, SimulationError};
