//! Generate command implementation
//!
//! Writes the synthetic historical dataset to `<output_dir>/historical.csv`.

use agri_core::rng::SimRng;
use infra_store::{ensure_dir, save_dataset};
use tracing::info;

use super::pipeline::{generate_history, HISTORICAL_FILE};
use crate::config::AppConfig;
use crate::Result;

/// Run the generate command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Generating historical dataset...");
    info!("  Start year: {}", config.start_year);
    info!("  Periods: {}", config.history_periods);

    let mut rng = SimRng::from_seed(config.seed);
    let dataset = generate_history(config, &mut rng)?;

    ensure_dir(&config.output_dir)?;
    let path = config.output_dir.join(HISTORICAL_FILE);
    save_dataset(&dataset, &path)?;

    println!(
        "Wrote {} rows ({}-{}) to {}",
        dataset.len(),
        dataset.first_year().unwrap_or(config.start_year),
        dataset.last_year().unwrap_or(config.start_year),
        path.display()
    );
    Ok(())
}
