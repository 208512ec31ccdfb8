//! # Random Number Generation Infrastructure
//!
//! Every stochastic routine in the workspace takes a `&mut SimRng` instead of
//! touching global state, so one seed reproduces an entire simulation and
//! independent runs can proceed in parallel with independent sources.
//!
//! ## Usage Example
//!
//! ```rust
//! use agri_core::rng::SimRng;
//!
//! let mut rng = SimRng::from_seed(123);
//!
//! let noise = rng.normal(0.0, 60.0);
//! let boost = rng.uniform_range(0.4, 0.6);
//! let shock_years = rng.sample_distinct(25, 2).unwrap();
//!
//! assert!(boost >= 0.4 && boost < 0.6);
//! assert_ne!(shock_years[0], shock_years[1]);
//! # let _ = noise;
//! ```

mod prng;

pub use prng::SimRng;
