//! Analyse command implementation
//!
//! Fits the yield model on a historical file and reports raw and
//! standardized coefficients.

use std::path::Path;

use agri_models::regression::RegressionAnalysis;
use infra_store::{ensure_dir, load_dataset};
use tracing::info;

use super::pipeline::{fit_and_analyse, resolve_input, write_analysis};
use crate::config::AppConfig;
use crate::{OutputFormat, Result};

/// Run the analyse command
pub fn run(config: &AppConfig, input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let path = resolve_input(config, input)?;
    info!("Analysing {}", path.display());

    let history = load_dataset(&path)?;
    let (_, analysis) = fit_and_analyse(&history)?;

    ensure_dir(&config.output_dir)?;
    write_analysis(&config.output_dir, &analysis)?;

    match format {
        OutputFormat::Table => print_table(&analysis),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }
    Ok(())
}

fn print_table(analysis: &RegressionAnalysis) {
    println!("\nIntercept: {:.3}", analysis.raw_intercept());
    println!("┌──────────────────┬──────────────┬──────────────┬──────────┐");
    println!("│ Factor           │ Per unit     │ Standardized │ Share %  │");
    println!("├──────────────────┼──────────────┼──────────────┼──────────┤");
    for (raw, std) in analysis.raw().iter().zip(analysis.standardized()) {
        println!(
            "│ {:<16} │ {:>12.3} │ {:>12.3} │ {:>8.2} │",
            raw.factor, raw.impact_per_unit, std.standardized_impact, std.relative_contribution_pct
        );
    }
    println!("└──────────────────┴──────────────┴──────────────┴──────────┘");
    if let Some(top) = analysis.dominant_factor() {
        println!("Dominant factor: {}", top.factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pipeline::{RAW_COEFFICIENTS_FILE, STANDARDIZED_COEFFICIENTS_FILE};
    use crate::CliError;
    use tempfile::tempdir;

    #[test]
    fn test_analyse_after_generate() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        crate::commands::generate::run(&config).unwrap();
        run(&config, None, OutputFormat::Json).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(RAW_COEFFICIENTS_FILE)).unwrap();
        assert_eq!(raw.lines().next(), Some("factor,impact_per_unit"));
        assert_eq!(raw.lines().count(), 7);
        assert!(dir.path().join(STANDARDIZED_COEFFICIENTS_FILE).exists());
    }

    #[test]
    fn test_analyse_without_history() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = run(&config, None, OutputFormat::Table).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
