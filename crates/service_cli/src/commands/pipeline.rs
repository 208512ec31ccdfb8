//! Pipeline steps shared by the commands.

use std::path::{Path, PathBuf};

use agri_core::rng::SimRng;
use agri_core::types::{Dataset, FactorKind};
use agri_models::generator::{HistoricalConfig, HistoricalSeriesGenerator};
use agri_models::regression::{fit_yield_model, ModelBundle, RegressionAnalysis};
use agri_scenarios::interventions::{
    InterventionScenarioEngine, RateSpecification, Scenario, ScenarioComparison, ScenarioResult,
};
use agri_scenarios::projection::{BaselineResult, FutureBaselineProjector};
use infra_store::{ensure_dir, read_dataset, save_dataset, save_records, write_dataset};
use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, ScenarioConfig};
use crate::{CliError, Result};

pub const HISTORICAL_FILE: &str = "historical.csv";
pub const BASELINE_FILE: &str = "baseline_future.csv";
pub const SCENARIO_FILE: &str = "scenario_future.csv";
pub const RAW_COEFFICIENTS_FILE: &str = "raw_coefficients.csv";
pub const STANDARDIZED_COEFFICIENTS_FILE: &str = "standardized_coefficients.csv";
pub const COMPARISON_FILE: &str = "comparison.csv";

/// Generate the historical dataset drawing from `rng`.
pub fn generate_history(config: &AppConfig, rng: &mut SimRng) -> Result<Dataset> {
    let generator = HistoricalSeriesGenerator::new(
        HistoricalConfig {
            start_year: config.start_year,
            n_periods: config.history_periods,
        },
        config.processes.clone(),
    )?;
    Ok(generator.generate(rng)?)
}

/// Input file given on the command line, else `<output_dir>/historical.csv`.
pub fn resolve_input(config: &AppConfig, input: Option<&Path>) -> Result<PathBuf> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir.join(HISTORICAL_FILE));
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(path)
}

/// Fit the yield model and derive its coefficient tables.
pub fn fit_and_analyse(history: &Dataset) -> Result<(ModelBundle, RegressionAnalysis)> {
    let bundle = fit_yield_model(history)?;
    let analysis = RegressionAnalysis::new(&bundle, history, FactorKind::Yield.column_name())?;
    Ok((bundle, analysis))
}

/// Projector for the configured horizon and processes.
pub fn projector(config: &AppConfig) -> Result<FutureBaselineProjector> {
    Ok(FutureBaselineProjector::new(
        config.processes.clone(),
        config.horizon_periods,
    )?)
}

fn to_scenario(config: &ScenarioConfig) -> Result<Scenario> {
    let rates = RateSpecification::from_entries(config.rates.iter().map(|(k, v)| (k, *v)))?;
    Ok(Scenario::new(&config.name, &config.description, rates))
}

/// Primary scenario followed by any additional ones.
pub fn scenarios(config: &AppConfig) -> Result<Vec<Scenario>> {
    std::iter::once(&config.scenario)
        .chain(&config.scenarios)
        .map(to_scenario)
        .collect()
}

/// Write both coefficient tables into `dir`.
pub fn write_analysis(dir: &Path, analysis: &RegressionAnalysis) -> Result<()> {
    save_records(analysis.raw(), dir.join(RAW_COEFFICIENTS_FILE))?;
    save_records(analysis.standardized(), dir.join(STANDARDIZED_COEFFICIENTS_FILE))?;
    Ok(())
}

/// One row of `comparison.csv`.
#[derive(Debug, Serialize)]
struct ComparisonRecord<'a> {
    scenario: &'a str,
    year: i32,
    baseline_yield_kg_ha: f64,
    scenario_yield_kg_ha: f64,
    delta: f64,
    delta_pct: f64,
}

/// Output file for an additional scenario: `scenario_<name>.csv` with every
/// character outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn scenario_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("scenario_{stem}.csv")
}

/// Everything the `run` command produces.
#[derive(Debug)]
pub struct PipelineOutputs {
    pub history: Dataset,
    pub analysis: RegressionAnalysis,
    pub baseline: BaselineResult,
    pub scenarios: Vec<ScenarioResult>,
    pub comparisons: Vec<ScenarioComparison>,
}

/// Run generate, fit, project and every scenario without touching the disk.
///
/// The historical table goes through the CSV codec in memory before fitting
/// so the model is trained on exactly what [`PipelineOutputs::write`]
/// persists. One random source covers generation and projection.
pub fn execute(config: &AppConfig) -> Result<PipelineOutputs> {
    config.validate()?;
    let mut rng = SimRng::from_seed(config.seed);

    let generated = generate_history(config, &mut rng)?;
    let mut buffer = Vec::new();
    write_dataset(&generated, &mut buffer)?;
    let history = read_dataset(buffer.as_slice())?;
    info!(rows = history.len(), "historical data ready");

    let (bundle, analysis) = fit_and_analyse(&history)?;
    let baseline = projector(config)?.project(&history, &bundle, &mut rng)?;

    let scenarios = scenarios(config)?;
    let results = InterventionScenarioEngine::new(&bundle).run_many(&baseline, &scenarios)?;
    let comparisons = results.iter().map(ScenarioComparison::from_result).collect();

    Ok(PipelineOutputs {
        history,
        analysis,
        baseline,
        scenarios: results,
        comparisons,
    })
}

impl PipelineOutputs {
    /// Write every table into `dir`, creating it when needed.
    pub fn write(&self, dir: &Path) -> Result<()> {
        ensure_dir(dir)?;
        save_dataset(&self.history, dir.join(HISTORICAL_FILE))?;
        write_analysis(dir, &self.analysis)?;
        save_dataset(self.baseline.dataset(), dir.join(BASELINE_FILE))?;

        for (i, result) in self.scenarios.iter().enumerate() {
            let file = if i == 0 {
                SCENARIO_FILE.to_string()
            } else {
                scenario_file_name(result.scenario_name())
            };
            save_dataset(result.dataset(), dir.join(file))?;
        }

        let records: Vec<ComparisonRecord<'_>> = self
            .comparisons
            .iter()
            .flat_map(|c| {
                let name = c.summary().scenario_name.as_str();
                c.rows().iter().map(move |r| ComparisonRecord {
                    scenario: name,
                    year: r.year,
                    baseline_yield_kg_ha: r.baseline_yield,
                    scenario_yield_kg_ha: r.scenario_yield,
                    delta: r.delta,
                    delta_pct: r.delta_pct,
                })
            })
            .collect();
        save_records(&records, dir.join(COMPARISON_FILE))?;
        info!(dir = %dir.display(), scenarios = self.scenarios.len(), "outputs written");
        Ok(())
    }
}
