//! Baseline versus scenario yield comparison.

use super::engine::ScenarioResult;

/// Yield comparison for one projected year.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YearComparison {
    /// Calendar year
    pub year: i32,
    /// Baseline yield
    pub baseline_yield: f64,
    /// Scenario yield
    pub scenario_yield: f64,
    /// Scenario minus baseline
    pub delta: f64,
    /// Delta as percentage of the baseline
    pub delta_pct: f64,
}

impl YearComparison {
    /// Create a comparison row.
    pub fn new(year: i32, baseline_yield: f64, scenario_yield: f64) -> Self {
        let delta = scenario_yield - baseline_yield;
        let delta_pct = if baseline_yield != 0.0 {
            delta / baseline_yield.abs() * 100.0
        } else {
            0.0
        };
        Self {
            year,
            baseline_yield,
            scenario_yield,
            delta,
            delta_pct,
        }
    }

    /// Check if the scenario improves on the baseline.
    pub fn is_gain(&self) -> bool {
        self.delta > 0.0
    }
}

/// Horizon totals for a comparison.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonSummary {
    /// Scenario name
    pub scenario_name: String,
    /// Number of compared years
    pub periods: usize,
    /// Sum of baseline yields
    pub total_baseline: f64,
    /// Sum of scenario yields
    pub total_scenario: f64,
    /// Sum of deltas
    pub total_delta: f64,
    /// Mean yearly delta
    pub mean_delta: f64,
    /// Total delta as percentage of total baseline
    pub total_delta_pct: f64,
    /// Delta in the last projected year
    pub final_delta: f64,
}

/// Year-by-year comparison plus summary.
///
/// # Examples
///
/// ```
/// use agri_scenarios::interventions::YearComparison;
///
/// let row = YearComparison::new(2030, 5000.0, 5250.0);
/// assert_eq!(row.delta, 250.0);
/// assert!((row.delta_pct - 5.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioComparison {
    rows: Vec<YearComparison>,
    summary: ComparisonSummary,
}

impl ScenarioComparison {
    /// Compare the scenario yield with the baseline yield it carries.
    pub fn from_result(result: &ScenarioResult) -> Self {
        let rows: Vec<YearComparison> = result
            .years()
            .iter()
            .zip(result.baseline_yields())
            .zip(result.yields())
            .map(|((year, b), s)| YearComparison::new(*year, *b, *s))
            .collect();

        let periods = rows.len();
        let total_baseline: f64 = rows.iter().map(|r| r.baseline_yield).sum();
        let total_scenario: f64 = rows.iter().map(|r| r.scenario_yield).sum();
        let total_delta = total_scenario - total_baseline;
        let summary = ComparisonSummary {
            scenario_name: result.scenario_name().to_string(),
            periods,
            total_baseline,
            total_scenario,
            total_delta,
            mean_delta: if periods > 0 {
                total_delta / periods as f64
            } else {
                0.0
            },
            total_delta_pct: if total_baseline != 0.0 {
                total_delta / total_baseline.abs() * 100.0
            } else {
                0.0
            },
            final_delta: rows.last().map_or(0.0, |r| r.delta),
        };

        Self { rows, summary }
    }

    /// Per-year rows.
    pub fn rows(&self) -> &[YearComparison] {
        &self.rows
    }

    /// Horizon summary.
    pub fn summary(&self) -> &ComparisonSummary {
        &self.summary
    }

    /// Number of years where the scenario beats the baseline.
    pub fn gain_years(&self) -> usize {
        self.rows.iter().filter(|r| r.is_gain()).count()
    }
}
