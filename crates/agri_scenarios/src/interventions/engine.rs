//! Compounding intervention engine.

use agri_core::types::{Dataset, FactorSeries, BASELINE_YIELD_COLUMN, SCENARIO_YIELD_COLUMN};
use agri_models::processes::clip_to_range;
use agri_models::regression::ModelBundle;
use rayon::prelude::*;
use tracing::{debug, info};

use super::presets::{PresetIntervention, Scenario};
use super::rates::{InterventionFactor, RateSpecification};
use crate::error::ScenarioError;
use crate::projection::BaselineResult;

/// A baseline future after an intervention, with `scenario_yield_kg_ha`.
///
/// The adjusted factors replace the baseline ones; `baseline_yield_kg_ha`
/// is carried through unchanged for comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioResult {
    scenario_name: String,
    rates: RateSpecification,
    dataset: Dataset,
}

impl ScenarioResult {
    /// Name of the scenario that produced this result.
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    /// Rates that were applied.
    pub fn rates(&self) -> &RateSpecification {
        &self.rates
    }

    /// Adjusted dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Projected years.
    pub fn years(&self) -> &[i32] {
        self.dataset.years()
    }

    /// Scenario yield per year.
    pub fn yields(&self) -> &[f64] {
        self.dataset.column(SCENARIO_YIELD_COLUMN).unwrap_or(&[])
    }

    /// Baseline yield per year.
    pub fn baseline_yields(&self) -> &[f64] {
        self.dataset.column(BASELINE_YIELD_COLUMN).unwrap_or(&[])
    }

    /// Treat the adjusted factors as a new baseline.
    ///
    /// The scenario yield becomes the baseline yield, so the result can be
    /// fed back into the engine.
    pub fn as_baseline(&self) -> Result<BaselineResult, ScenarioError> {
        let mut dataset = Dataset::from_years(self.dataset.years().to_vec())?;
        for series in self.dataset.series() {
            match series.name() {
                BASELINE_YIELD_COLUMN => {}
                SCENARIO_YIELD_COLUMN => dataset.push_series(FactorSeries::new(
                    BASELINE_YIELD_COLUMN,
                    series.values().to_vec(),
                ))?,
                _ => dataset.push_series(series.clone())?,
            }
        }
        BaselineResult::new(dataset)
    }

    /// Consume into the underlying dataset.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Applies compounding annual rates to a baseline and re-scores yield.
///
/// At zero-based horizon offset `t`, growth-style factors are multiplied by
/// `(1 + r)^t` and soil by `(1 - r)^t`. Soil, irrigation and fertilizer are
/// then clipped back to their physical bounds. Rainfall and temperature are
/// not. The engine draws no random numbers.
///
/// # Examples
///
/// ```
/// use agri_core::rng::SimRng;
/// use agri_models::generator::HistoricalSeriesGenerator;
/// use agri_models::regression::fit_yield_model;
/// use agri_scenarios::interventions::{InterventionScenarioEngine, RateSpecification};
/// use agri_scenarios::projection::FutureBaselineProjector;
///
/// let mut rng = SimRng::from_seed(123);
/// let history = HistoricalSeriesGenerator::with_defaults().generate(&mut rng).unwrap();
/// let bundle = fit_yield_model(&history).unwrap();
/// let baseline = FutureBaselineProjector::with_defaults()
///     .project(&history, &bundle, &mut rng)
///     .unwrap();
///
/// let engine = InterventionScenarioEngine::new(&bundle);
/// let unchanged = engine.run(&baseline, &RateSpecification::new()).unwrap();
/// assert_eq!(unchanged.yields(), baseline.yields());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InterventionScenarioEngine<'a> {
    bundle: &'a ModelBundle,
}

impl<'a> InterventionScenarioEngine<'a> {
    /// Create an engine scoring with `bundle`.
    pub fn new(bundle: &'a ModelBundle) -> Self {
        Self { bundle }
    }

    /// Model used for re-scoring.
    pub fn bundle(&self) -> &ModelBundle {
        self.bundle
    }

    /// Apply `rates` to `baseline` under the name `"custom"`.
    pub fn run(
        &self,
        baseline: &BaselineResult,
        rates: &RateSpecification,
    ) -> Result<ScenarioResult, ScenarioError> {
        self.apply("custom", baseline, rates)
    }

    /// Apply a named scenario.
    pub fn run_scenario(
        &self,
        baseline: &BaselineResult,
        scenario: &Scenario,
    ) -> Result<ScenarioResult, ScenarioError> {
        self.apply(scenario.name(), baseline, scenario.rates())
    }

    /// Apply several scenarios to one baseline in parallel.
    ///
    /// Results are in the order of `scenarios` and equal the sequential runs.
    pub fn run_many(
        &self,
        baseline: &BaselineResult,
        scenarios: &[Scenario],
    ) -> Result<Vec<ScenarioResult>, ScenarioError> {
        info!(scenarios = scenarios.len(), "running scenarios in parallel");
        scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(baseline, scenario))
            .collect()
    }

    fn apply(
        &self,
        name: &str,
        baseline: &BaselineResult,
        rates: &RateSpecification,
    ) -> Result<ScenarioResult, ScenarioError> {
        let mut dataset = baseline.dataset().clone();

        for factor in InterventionFactor::ALL {
            let rate = rates.rate(factor);
            let column = factor.factor().column_name();
            let values = dataset
                .column_mut(column)
                .ok_or_else(|| ScenarioError::MissingBaselineColumn(column.to_string()))?;
            for (t, value) in values.iter_mut().enumerate() {
                *value *= factor.multiplier(rate, t);
            }
            if factor.reclipped() {
                if let Some(bounds) = factor.factor().bounds() {
                    clip_to_range(values, bounds.lower, bounds.upper);
                }
            }
            debug!(scenario = name, %factor, rate, "applied intervention");
        }

        let yields = self.bundle.predict(&dataset)?;
        dataset.set_series(FactorSeries::new(SCENARIO_YIELD_COLUMN, yields))?;

        info!(scenario = name, periods = dataset.len(), "scenario evaluated");
        Ok(ScenarioResult {
            scenario_name: name.to_string(),
            rates: rates.clone(),
            dataset,
        })
    }
}

/// Apply `rates` to `baseline`, re-scoring with `bundle`.
pub fn run_intervention_scenario(
    baseline: &BaselineResult,
    bundle: &ModelBundle,
    rates: &RateSpecification,
) -> Result<ScenarioResult, ScenarioError> {
    InterventionScenarioEngine::new(bundle).run(baseline, rates)
}

/// Apply the canonical best-case 1% rates.
pub fn run_best_case_1pct_scenario(
    baseline: &BaselineResult,
    bundle: &ModelBundle,
) -> Result<ScenarioResult, ScenarioError> {
    InterventionScenarioEngine::new(bundle)
        .run_scenario(baseline, &PresetIntervention::BestCase1Pct.scenario())
}
