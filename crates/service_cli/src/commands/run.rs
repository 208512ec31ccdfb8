//! Run command implementation
//!
//! Full pipeline: generate, fit, project and evaluate every configured
//! scenario, then write all tables once everything has succeeded.

use agri_scenarios::interventions::ComparisonSummary;
use tracing::info;

use super::pipeline::{execute, PipelineOutputs};
use crate::config::AppConfig;
use crate::{OutputFormat, Result};

/// Run the full pipeline
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<()> {
    info!("Running full pipeline...");
    info!("  History: {} periods from {}", config.history_periods, config.start_year);
    info!("  Horizon: {} periods", config.horizon_periods);
    info!("  Scenarios: {}", 1 + config.scenarios.len());

    let outputs = execute(config)?;
    outputs.write(&config.output_dir)?;

    let summaries: Vec<&ComparisonSummary> =
        outputs.comparisons.iter().map(|c| c.summary()).collect();
    match format {
        OutputFormat::Table => print_summary(&outputs, &summaries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    info!("Pipeline complete");
    Ok(())
}

fn print_summary(outputs: &PipelineOutputs, summaries: &[&ComparisonSummary]) {
    println!(
        "\nHistory {} rows, baseline {} rows",
        outputs.history.len(),
        outputs.baseline.dataset().len()
    );
    println!("┌──────────────────────┬──────────────┬──────────────┬──────────┐");
    println!("│ Scenario             │ Total delta  │ Final delta  │ Total %  │");
    println!("├──────────────────────┼──────────────┼──────────────┼──────────┤");
    for s in summaries {
        println!(
            "│ {:<20} │ {:>12.1} │ {:>12.1} │ {:>8.2} │",
            s.scenario_name, s.total_delta, s.final_delta, s.total_delta_pct
        );
    }
    println!("└──────────────────────┴──────────────┴──────────────┴──────────┘");
}
