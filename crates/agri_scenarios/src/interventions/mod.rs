//! Intervention scenarios on a projected baseline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               Intervention Scenarios                 │
//! ├──────────────────────────────────────────────────────┤
//! │  RateSpecification          - rate per factor        │
//! │  Scenario                   - named set of rates     │
//! │  InterventionScenarioEngine - compounding + rescore  │
//! │  ScenarioComparison         - baseline vs scenario   │
//! └──────────────────────────────────────────────────────┘
//! ```

mod comparison;
mod engine;
mod presets;
mod rates;

pub use comparison::{ComparisonSummary, ScenarioComparison, YearComparison};
pub use engine::{
    run_best_case_1pct_scenario, run_intervention_scenario, InterventionScenarioEngine,
    ScenarioResult,
};
pub use presets::{PresetIntervention, Scenario};
pub use rates::{InterventionFactor, RateSpecification, RateStyle};
