//! Project command implementation
//!
//! Projects the baseline future from a historical file and writes
//! `<output_dir>/baseline_future.csv`.

use std::path::Path;

use agri_core::rng::SimRng;
use infra_store::{ensure_dir, load_dataset, save_dataset};
use tracing::info;

use super::pipeline::{fit_and_analyse, projector, resolve_input, BASELINE_FILE};
use crate::config::AppConfig;
use crate::Result;

/// Run the project command
pub fn run(config: &AppConfig, input: Option<&Path>) -> Result<()> {
    let path = resolve_input(config, input)?;
    info!("Projecting {} periods from {}", config.horizon_periods, path.display());

    let history = load_dataset(&path)?;
    let (bundle, _) = fit_and_analyse(&history)?;

    // Stand-alone projection draws from a fresh stream of the configured seed
    let mut rng = SimRng::from_seed(config.seed);
    let baseline = projector(config)?.project(&history, &bundle, &mut rng)?;

    ensure_dir(&config.output_dir)?;
    let out = config.output_dir.join(BASELINE_FILE);
    save_dataset(baseline.dataset(), &out)?;

    println!("\n┌────────┬──────────────┐");
    println!("│ Year   │ Yield kg/ha  │");
    println!("├────────┼──────────────┤");
    for (year, y) in baseline.years().iter().zip(baseline.yields()) {
        println!("│ {:<6} │ {:>12.1} │", year, y);
    }
    println!("└────────┴──────────────┘");
    println!("Wrote {}", out.display());
    Ok(())
}
