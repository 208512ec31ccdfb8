//! # agri_scenarios (L3: Application)
//!
//! Baseline future projection and intervention scenario evaluation.
//!
//! This crate provides:
//! - `FutureBaselineProjector`: continues the historical processes past the
//!   last observed year and scores the result with a fitted model
//! - `InterventionScenarioEngine`: compounding annual adjustments, physical
//!   re-clipping and re-scoring
//! - Preset and named scenarios, parallel batch runs and year-by-year
//!   comparison against the baseline
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          agri_scenarios (L3)            │
//! ├─────────────────────────────────────────┤
//! │  projection     - baseline future       │
//! │  interventions/ - rates, engine,        │
//! │                   presets, comparison   │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           agri_models (L2)              │
//! │  processes, generator, ModelBundle      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use agri_core::rng::SimRng;
//! use agri_models::generator::HistoricalSeriesGenerator;
//! use agri_models::regression::fit_yield_model;
//! use agri_scenarios::interventions::{run_best_case_1pct_scenario, ScenarioComparison};
//! use agri_scenarios::projection::FutureBaselineProjector;
//!
//! let mut rng = SimRng::from_seed(123);
//! let history = HistoricalSeriesGenerator::with_defaults().generate(&mut rng).unwrap();
//! let bundle = fit_yield_model(&history).unwrap();
//! let baseline = FutureBaselineProjector::with_defaults()
//!     .project(&history, &bundle, &mut rng)
//!     .unwrap();
//!
//! let scenario = run_best_case_1pct_scenario(&baseline, &bundle).unwrap();
//! let comparison = ScenarioComparison::from_result(&scenario);
//! assert_eq!(comparison.rows().len(), 10);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod interventions;
pub mod projection;

pub use error::ScenarioError;
