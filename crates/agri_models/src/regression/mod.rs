//! Yield response model.
//!
//! Ordinary least squares on standardised features, packaged as an
//! immutable [`ModelBundle`] that fixes the feature order and the
//! standardisation at fit time. [`RegressionAnalysis`] derives the raw and
//! standardised coefficient tables used to attribute yield to its drivers.

mod analysis;
mod bundle;
mod ols;
mod scaler;

pub use analysis::{RawCoefficient, RegressionAnalysis, StandardizedImpact};
pub use bundle::{fit_yield_model, ModelBundle, YIELD_FEATURES};
pub use ols::LinearModel;
pub use scaler::StandardScaler;
