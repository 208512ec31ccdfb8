//! Numerical helpers shared by the generator and the regression model.
//!
//! - [`stats`]: means and population standard deviations
//! - [`linalg`]: least-squares normal equations solved by Cholesky decomposition

pub mod linalg;
pub mod stats;

pub use linalg::{solve_cholesky, solve_normal_equations};
pub use stats::{mean, population_std, population_variance};
