//! Pipeline configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! CLI arguments.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use agri_models::processes::ProcessParameters;
use agri_models::regression::YIELD_FEATURES;
use agri_scenarios::interventions::{InterventionFactor, PresetIntervention, RateSpecification};
use serde::Deserialize;
use thiserror::Error;

use crate::commands::pipeline::{scenario_file_name, SCENARIO_FILE};

/// Default configuration file, read when present.
pub const DEFAULT_CONFIG_FILE: &str = "agritrend.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError { var: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// A named rate table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Scenario name used in outputs
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Annual rates keyed by factor (`rainfall`, `temperature`, `soil`,
    /// `irrigation`, `fertilizer`); unknown keys are ignored
    pub rates: BTreeMap<String, f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let preset = PresetIntervention::BestCase1Pct;
        Self {
            name: preset.name().to_string(),
            description: preset.description().to_string(),
            rates: preset
                .rates()
                .iter()
                .map(|(f, r)| (f.key().to_string(), r))
                .collect(),
        }
    }
}

/// Pipeline configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed of the single random source threaded through the run
    pub seed: u64,
    /// First historical year
    pub start_year: i32,
    /// Number of historical periods
    pub history_periods: usize,
    /// Number of projected periods
    pub horizon_periods: usize,
    /// Directory receiving CSV outputs
    pub output_dir: PathBuf,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Primary intervention scenario
    pub scenario: ScenarioConfig,
    /// Additional scenarios evaluated alongside the primary one
    pub scenarios: Vec<ScenarioConfig>,
    /// Process parameter overrides
    pub processes: ProcessParameters,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            start_year: 2000,
            history_periods: 25,
            horizon_periods: 10,
            output_dir: PathBuf::from("outputs"),
            log_level: LogLevel::Info,
            scenario: ScenarioConfig::default(),
            scenarios: Vec::new(),
            processes: ProcessParameters::default(),
        }
    }
}

/// Environment variables read by [`AppConfig::apply_env`].
pub const ENV_SEED: &str = "AGRITREND_SEED";
/// Output directory override.
pub const ENV_OUTPUT_DIR: &str = "AGRITREND_OUTPUT_DIR";
/// Log level override.
pub const ENV_LOG_LEVEL: &str = "AGRITREND_LOG_LEVEL";
/// Horizon override.
pub const ENV_HORIZON: &str = "AGRITREND_HORIZON";

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override from process environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Override from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = parse_env(ENV_SEED, &seed)?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(horizon) = lookup(ENV_HORIZON) {
            self.horizon_periods = parse_env(ENV_HORIZON, &horizon)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(horizon) = cli.horizon {
            self.horizon_periods = horizon;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_history = YIELD_FEATURES.len() + 1;
        if self.history_periods < min_history {
            return Err(ConfigError::invalid(
                "history_periods",
                format!(
                    "{} periods cannot fit {} features plus an intercept",
                    self.history_periods,
                    YIELD_FEATURES.len()
                ),
            ));
        }
        if self.horizon_periods == 0 {
            return Err(ConfigError::invalid("horizon_periods", "must be at least 1"));
        }
        for scenario in std::iter::once(&self.scenario).chain(&self.scenarios) {
            if scenario.name.trim().is_empty() {
                return Err(ConfigError::invalid("scenario.name", "must not be empty"));
            }
            for (key, rate) in &scenario.rates {
                // Unknown keys are skipped with a warning when the scenario is built
                let Ok(factor) = key.parse::<InterventionFactor>() else {
                    continue;
                };
                if let Err(e) = RateSpecification::new().with_rate(factor, *rate) {
                    return Err(ConfigError::invalid(
                        &format!("{}.rates.{}", scenario.name, key),
                        e.to_string(),
                    ));
                }
            }
        }

        // Additional scenarios must not overwrite the primary file or each other
        let mut files = HashSet::from([SCENARIO_FILE.to_string()]);
        for scenario in &self.scenarios {
            let file = scenario_file_name(&scenario.name);
            if !files.insert(file.clone()) {
                return Err(ConfigError::invalid(
                    &format!("scenarios.{}", scenario.name),
                    format!("output file {file} is already used by another scenario"),
                ));
            }
        }
        self.processes
            .validate()
            .map_err(|e| ConfigError::invalid("processes", e.to_string()))
    }
}

fn parse_env<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvError {
        var: var.to_string(),
        value: value.to_string(),
    })
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Horizon override
    pub horizon: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (explicit path, else `agritrend.toml` when present)
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AppConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    config.apply_env()?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.seed, 123);
        assert_eq!(config.start_year, 2000);
        assert_eq!(config.history_periods, 25);
        assert_eq!(config.horizon_periods, 10);
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.scenario.name, "best_case_1pct");
        assert_eq!(config.scenario.rates.get("soil"), Some(&0.01));
        assert_eq!(config.scenario.rates.get("temperature"), Some(&-0.01));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            seed = 7
            log_level = "debug"

            [scenario]
            name = "irrigation_push"

            [scenario.rates]
            irrigation = 0.03

            [processes.soil]
            initial = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.history_periods, 25);
        assert_eq!(config.scenario.name, "irrigation_push");
        assert_eq!(config.scenario.rates.len(), 1);
        assert_eq!(config.processes.soil.initial, 0.8);
        assert_eq!(config.processes.soil.degradation_per_period, 0.003);
    }

    #[test]
    fn test_additional_scenarios() {
        let config = AppConfig::from_toml_str(
            r#"
            [[scenarios]]
            name = "fertilizer_cut"
            rates = { fertilizer = -0.02 }
            "#,
        )
        .unwrap();
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.scenarios[0].rates.get("fertilizer"), Some(&-0.02));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_in_file() {
        assert!(AppConfig::from_toml_str("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_SEED, "42"),
            (ENV_OUTPUT_DIR, "/tmp/agri"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_HORIZON, "15"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config
            .apply_env_with(|var| vars.get(var).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/agri"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.horizon_periods, 15);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_with(|var| (var == ENV_SEED).then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { ref var, .. } if var == ENV_SEED));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = AppConfig::default();
        config
            .apply_env_with(|var| (var == ENV_SEED).then(|| "42".to_string()))
            .unwrap();
        config.merge_with_cli(&CliOverrides {
            seed: Some(9),
            horizon: Some(4),
            ..Default::default()
        });
        assert_eq!(config.seed, 9);
        assert_eq!(config.horizon_periods, 4);
    }

    #[test]
    fn test_validation() {
        let config = AppConfig {
            history_periods: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "history_periods"
        ));

        let config = AppConfig {
            horizon_periods: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.processes.soil.noise_std = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_file_parses() {
        let config =
            AppConfig::from_toml_str(include_str!("../../../agritrend.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenario.name, "best_case_1pct");
        assert_eq!(config.scenario.rates.get("temperature"), Some(&-0.01));
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[1].rates.get("fertilizer"), Some(&-0.02));
        assert_eq!(config.processes, ProcessParameters::default());
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let mut config = AppConfig::default();
        config.scenario.rates.insert("rainfall".to_string(), -2.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "best_case_1pct.rates.rainfall"
        ));

        let mut config = AppConfig::default();
        config.scenario.rates.insert("soil".to_string(), 1.0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scenario.rates.insert("humidity".to_string(), -5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_colliding_scenario_files_rejected() {
        let extra = |name: &str| ScenarioConfig {
            name: name.to_string(),
            description: String::new(),
            rates: BTreeMap::new(),
        };

        let mut config = AppConfig::default();
        config.scenarios.push(extra("future"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "scenarios.future"
        ));

        let mut config = AppConfig::default();
        config.scenarios.push(extra("a b"));
        config.scenarios.push(extra("a/b"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "scenarios.a/b"
        ));

        let mut config = AppConfig::default();
        config.scenarios.push(extra("wet"));
        config.scenarios.push(extra("dry"));
        assert!(config.validate().is_ok());
    }
}
