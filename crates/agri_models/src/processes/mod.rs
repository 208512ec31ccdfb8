//! Random process primitives and their parameters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Factor Processes                     │
//! ├──────────────────────────────────────────────────────┤
//! │  trended_noisy_series   - rainfall, temperature, ... │
//! │  bounded_random_walk    - soil index                 │
//! │  inject_discrete_shocks - extreme years, outbreaks   │
//! │  clip_to_range          - physical bounds            │
//! │  ProcessParameters      - shared by generator and    │
//! │                           future projection          │
//! └──────────────────────────────────────────────────────┘
//! ```

mod params;
mod primitives;

pub use params::{
    FertilizerProcess, IrrigationProcess, PestProcess, ProcessParameters, RainfallProcess,
    SoilProcess, TrendNoise, YieldDrivers, YieldProcess,
};
pub use primitives::{
    bounded_random_walk, clip_to_range, inject_discrete_shocks, trended_noisy_series,
    uniform_series, ShockMagnitude,
};
