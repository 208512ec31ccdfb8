//! End-to-end pipeline tests: generate, fit, project, intervene.

use agri_core::rng::SimRng;
use agri_core::types::{Dataset, FactorKind, SCENARIO_YIELD_COLUMN};
use agri_models::generator::HistoricalSeriesGenerator;
use agri_models::regression::{fit_yield_model, ModelBundle};
use agri_scenarios::interventions::{
    run_best_case_1pct_scenario, InterventionScenarioEngine, PresetIntervention,
    RateSpecification, ScenarioComparison,
};
use agri_scenarios::projection::{BaselineResult, FutureBaselineProjector};
use approx::assert_relative_eq;
use proptest::prelude::*;

fn pipeline(seed: u64) -> (Dataset, ModelBundle, BaselineResult) {
    let mut rng = SimRng::from_seed(seed);
    let history = HistoricalSeriesGenerator::with_defaults()
        .generate(&mut rng)
        .unwrap();
    let bundle = fit_yield_model(&history).unwrap();
    let baseline = FutureBaselineProjector::with_defaults()
        .project(&history, &bundle, &mut rng)
        .unwrap();
    (history, bundle, baseline)
}

// =============================================================================
// Best-case scenario
// =============================================================================

#[test]
fn test_best_case_returns_full_horizon() {
    let (history, bundle, baseline) = pipeline(123);
    let result = run_best_case_1pct_scenario(&baseline, &bundle).unwrap();

    let last = history.last_year().unwrap();
    let expected: Vec<i32> = (last + 1..=last + 10).collect();
    assert_eq!(result.years(), expected.as_slice());

    let yields = result.dataset().column(SCENARIO_YIELD_COLUMN).unwrap();
    assert_eq!(yields.len(), 10);
    assert!(yields.iter().all(|v| v.is_finite()));
}

#[test]
fn test_best_case_keeps_managed_factors_in_bounds() {
    let (_, bundle, baseline) = pipeline(42);
    let result = run_best_case_1pct_scenario(&baseline, &bundle).unwrap();
    for factor in [
        FactorKind::SoilIndex,
        FactorKind::Irrigation,
        FactorKind::Fertilizer,
    ] {
        let bounds = factor.bounds().unwrap();
        let values = result.dataset().factor(factor).unwrap();
        assert!(values.iter().all(|v| bounds.contains(*v)), "{factor}");
    }
}

#[test]
fn test_comparison_totals_match_rows() {
    let (_, bundle, baseline) = pipeline(7);
    let result = run_best_case_1pct_scenario(&baseline, &bundle).unwrap();
    let comparison = ScenarioComparison::from_result(&result);

    let summary = comparison.summary();
    assert_eq!(summary.periods, 10);
    assert_eq!(summary.scenario_name, "best_case_1pct");
    let row_delta: f64 = comparison.rows().iter().map(|r| r.delta).sum();
    assert_relative_eq!(summary.total_delta, row_delta, epsilon = 1e-6);
    // No adjustment at the first projected year
    assert_eq!(comparison.rows()[0].delta, 0.0);
}

#[test]
fn test_presets_in_parallel() {
    let (_, bundle, baseline) = pipeline(123);
    let scenarios: Vec<_> = PresetIntervention::ALL
        .iter()
        .map(|p| p.scenario())
        .collect();
    let results = InterventionScenarioEngine::new(&bundle)
        .run_many(&baseline, &scenarios)
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].scenario_name(), "no_intervention");
    assert_eq!(results[0].yields(), baseline.yields());
    assert_eq!(
        results[1],
        run_best_case_1pct_scenario(&baseline, &bundle).unwrap()
    );
}

#[test]
fn test_full_pipeline_is_reproducible() {
    let (_, bundle_a, baseline_a) = pipeline(99);
    let (_, bundle_b, baseline_b) = pipeline(99);
    assert_eq!(bundle_a, bundle_b);
    assert_eq!(baseline_a, baseline_b);
}

#[cfg(feature = "serde")]
#[test]
fn test_comparison_serialises_to_json() {
    let (_, bundle, baseline) = pipeline(123);
    let result = run_best_case_1pct_scenario(&baseline, &bundle).unwrap();
    let json = serde_json::to_value(ScenarioComparison::from_result(&result)).unwrap();
    assert_eq!(json["summary"]["periods"], 10);
    assert_eq!(json["rows"].as_array().unwrap().len(), 10);
    let rates = serde_json::to_value(result.rates()).unwrap();
    assert_eq!(rates["rates"]["soil"], 0.01);
}

// =============================================================================
// Properties over seeds
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_zero_rates_are_a_no_op(seed in any::<u64>()) {
        let (_, bundle, baseline) = pipeline(seed);
        let result = InterventionScenarioEngine::new(&bundle)
            .run(&baseline, &RateSpecification::new())
            .unwrap();
        prop_assert_eq!(result.yields(), baseline.yields());
    }

    #[test]
    fn prop_irrigation_compounding(seed in any::<u64>(), rate in -0.05f64..0.05) {
        let (_, bundle, baseline) = pipeline(seed);
        let rates = RateSpecification::from_entries([("irrigation", rate)]).unwrap();
        let result = InterventionScenarioEngine::new(&bundle)
            .run(&baseline, &rates)
            .unwrap();
        let base = baseline.dataset().factor(FactorKind::Irrigation).unwrap();
        let adjusted = result.dataset().factor(FactorKind::Irrigation).unwrap();
        for t in 0..base.len() {
            let expected = (base[t] * (1.0 + rate).powi(t as i32)).clamp(30.0, 70.0);
            prop_assert!((adjusted[t] - expected).abs() < 1e-9);
        }
    }
}
