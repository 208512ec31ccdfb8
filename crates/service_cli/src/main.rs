//! AgriTrend CLI - Synthetic Yield Simulation Pipeline
//!
//! This is the operational entry point for the agritrend workspace.
//!
//! # Commands
//!
//! - `agritrend generate` - Generate the synthetic historical dataset
//! - `agritrend analyse` - Fit the yield model and write coefficient tables
//! - `agritrend project` - Project the baseline future from a historical file
//! - `agritrend run` - Full pipeline including intervention scenarios
//!
//! # Architecture
//!
//! As the service layer, this crate orchestrates generation, modelling,
//! projection, scenario evaluation and storage. All computation happens in
//! the library crates; this binary only wires configuration, logging and
//! file output.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{build_config, CliOverrides, LogLevel};
pub use error::{CliError, Result};

/// AgriTrend yield simulation CLI
#[derive(Parser)]
#[command(name = "agritrend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./agritrend.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Console output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the synthetic historical dataset
    Generate,

    /// Fit the yield model and write raw and standardized coefficients
    Analyse {
        /// Historical CSV (defaults to <output_dir>/historical.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Project the baseline future from a historical CSV
    Project {
        /// Historical CSV (defaults to <output_dir>/historical.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of projected periods
        #[arg(long)]
        horizon: Option<usize>,
    },

    /// Run the full pipeline: generate, fit, project and evaluate scenarios
    Run {
        /// Number of projected periods
        #[arg(long)]
        horizon: Option<usize>,

        /// Output format for the comparison summary
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

impl Commands {
    fn horizon(&self) -> Option<usize> {
        match self {
            Commands::Project { horizon, .. } | Commands::Run { horizon, .. } => *horizon,
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => Some(level.parse::<LogLevel>()?),
        (None, true) => Some(LogLevel::Debug),
        (None, false) => None,
    };
    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        seed: cli.seed,
        output_dir: cli.output_dir.clone(),
        log_level,
        horizon: cli.command.horizon(),
    };
    let config = build_config(&overrides)?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    info!(seed = config.seed, output_dir = %config.output_dir.display(), "agritrend starting");
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Generate => commands::generate::run(&config),
        Commands::Analyse { input, format } => {
            commands::analyse::run(&config, input.as_deref(), format)
        }
        Commands::Project { input, .. } => commands::project::run(&config, input.as_deref()),
        Commands::Run { format, .. } => commands::run::run(&config, format),
    }
}
