//! Seeded generator for the historical window.

use agri_core::math::mean;
use agri_core::rng::SimRng;
use agri_core::types::{round_to_decimals, Dataset, FactorKind, FactorSeries};
use tracing::debug;

use crate::error::SimulationError;
use crate::processes::{
    bounded_random_walk, inject_discrete_shocks, trended_noisy_series, uniform_series,
    ProcessParameters, ShockMagnitude, YieldDrivers,
};

/// Extent of the historical window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalConfig {
    /// Calendar year of the first period
    pub start_year: i32,
    /// Number of periods
    pub n_periods: usize,
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            start_year: 2000,
            n_periods: 25,
        }
    }
}

/// Produces one self-consistent historical [`Dataset`].
///
/// Physical clips are applied after trend, noise and shocks are composed.
/// Dependent factors read the unrounded values of their inputs; rounding
/// to each factor's precision happens once, when the dataset is assembled.
///
/// # Examples
///
/// ```
/// use agri_core::rng::SimRng;
/// use agri_core::types::FactorKind;
/// use agri_models::generator::HistoricalSeriesGenerator;
///
/// let generator = HistoricalSeriesGenerator::with_defaults();
/// let history = generator.generate(&mut SimRng::from_seed(123)).unwrap();
///
/// assert_eq!(history.len(), 25);
/// assert_eq!(history.first_year(), Some(2000));
/// let soil = history.factor(FactorKind::SoilIndex).unwrap();
/// assert!(soil.iter().all(|v| (0.5..=0.85).contains(v)));
/// ```
#[derive(Debug, Clone)]
pub struct HistoricalSeriesGenerator {
    config: HistoricalConfig,
    params: ProcessParameters,
}

impl HistoricalSeriesGenerator {
    /// Create a generator, validating the window and parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an empty window or unusable parameter
    /// - `TooManyShocks` when extreme years or outbreaks exceed the window
    pub fn new(config: HistoricalConfig, params: ProcessParameters) -> Result<Self, SimulationError> {
        if config.n_periods == 0 {
            return Err(SimulationError::invalid("history.n_periods", "must be positive"));
        }
        params.validate()?;
        for requested in [params.rainfall.extreme_events, params.pest.outbreaks] {
            if requested > config.n_periods {
                return Err(SimulationError::TooManyShocks {
                    requested,
                    periods: config.n_periods,
                });
            }
        }
        Ok(Self { config, params })
    }

    /// Generator for 2000..=2024 with the default process parameters.
    pub fn with_defaults() -> Self {
        Self {
            config: HistoricalConfig::default(),
            params: ProcessParameters::default(),
        }
    }

    /// Window configuration.
    pub fn config(&self) -> &HistoricalConfig {
        &self.config
    }

    /// Process parameters.
    pub fn params(&self) -> &ProcessParameters {
        &self.params
    }

    /// Generate the historical dataset.
    ///
    /// Columns, in order: rainfall, temperature, soil index, irrigation,
    /// fertilizer, pest pressure, yield.
    pub fn generate(&self, rng: &mut SimRng) -> Result<Dataset, SimulationError> {
        let n = self.config.n_periods;
        let p = &self.params;

        // 1. Rainfall with extreme years
        let mut rainfall = trended_noisy_series(&p.rainfall.trend, 0, n, rng);
        let extreme_years = inject_discrete_shocks(
            &mut rainfall,
            p.rainfall.extreme_events,
            &ShockMagnitude::Choice(p.rainfall.extreme_magnitudes.clone()),
            rng,
        )?;
        clip_factor(FactorKind::Rainfall, &mut rainfall);
        debug!(?extreme_years, "rainfall generated");

        // 2. Temperature
        let temperature = trended_noisy_series(&p.temperature, 0, n, rng);

        // 3. Soil index, auto-regressive
        let mut soil = bounded_random_walk(
            p.soil.initial,
            -p.soil.degradation_per_period,
            p.soil.noise_std,
            n,
            rng,
        );
        clip_factor(FactorKind::SoilIndex, &mut soil);

        // 4. Irrigation reacts to rainfall deviation from the window mean
        let mean_rainfall = mean(&rainfall).unwrap_or_default();
        let mut irrigation: Vec<f64> = (0..n)
            .map(|i| {
                p.irrigation.level(i as f64, rainfall[i], mean_rainfall)
                    + rng.normal(0.0, p.irrigation.trend.noise_std)
            })
            .collect();
        clip_factor(FactorKind::Irrigation, &mut irrigation);

        // 5. Fertilizer reads irrigation and soil
        let mut fertilizer: Vec<f64> = (0..n)
            .map(|i| {
                p.fertilizer.level(i as f64, irrigation[i], soil[i])
                    + rng.normal(0.0, p.fertilizer.trend.noise_std)
            })
            .collect();
        clip_factor(FactorKind::Fertilizer, &mut fertilizer);

        // 6. Pest pressure with outbreak years
        let mut pest = uniform_series(p.pest.base_low, p.pest.base_high, n, rng);
        let outbreak_years = inject_discrete_shocks(
            &mut pest,
            p.pest.outbreaks,
            &ShockMagnitude::Uniform {
                low: p.pest.boost_low,
                high: p.pest.boost_high,
            },
            rng,
        )?;
        clip_factor(FactorKind::PestPressure, &mut pest);
        debug!(?outbreak_years, "pest pressure generated");

        // 7. Yield
        let mut yields: Vec<f64> = (0..n)
            .map(|i| {
                let drivers = YieldDrivers {
                    rainfall: rainfall[i],
                    temperature: temperature[i],
                    soil: soil[i],
                    irrigation: irrigation[i],
                    fertilizer: fertilizer[i],
                    pest: pest[i],
                };
                p.yield_response.level(i as f64, &drivers)
                    + rng.normal(0.0, p.yield_response.noise_std)
            })
            .collect();
        clip_factor(FactorKind::Yield, &mut yields);

        let mut dataset = Dataset::with_start_year(self.config.start_year, n);
        for (factor, values) in [
            (FactorKind::Rainfall, rainfall),
            (FactorKind::Temperature, temperature),
            (FactorKind::SoilIndex, soil),
            (FactorKind::Irrigation, irrigation),
            (FactorKind::Fertilizer, fertilizer),
            (FactorKind::PestPressure, pest),
            (FactorKind::Yield, yields),
        ] {
            let decimals = factor.decimals();
            let rounded = values
                .into_iter()
                .map(|v| round_to_decimals(v, decimals))
                .collect();
            dataset.push_series(FactorSeries::for_factor(factor, rounded))?;
        }

        debug!(
            start_year = self.config.start_year,
            periods = n,
            seed = rng.seed(),
            "historical dataset generated"
        );
        Ok(dataset)
    }
}

fn clip_factor(factor: FactorKind, values: &mut [f64]) {
    if let Some(bounds) = factor.bounds() {
        bounds.clip_slice(values);
    }
}
