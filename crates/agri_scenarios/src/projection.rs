//! Baseline future projection.
//!
//! Continues every stochastic process of the historical window for a fixed
//! horizon and scores the result with an already fitted [`ModelBundle`].

use agri_core::math::mean;
use agri_core::rng::SimRng;
use agri_core::types::{
    DataError, Dataset, FactorKind, FactorSeries, BASELINE_YIELD_COLUMN,
};
use agri_models::processes::{
    bounded_random_walk, clip_to_range, trended_noisy_series, ProcessParameters,
};
use agri_models::regression::ModelBundle;
use tracing::{debug, info};

use crate::error::ScenarioError;

/// Default number of projected periods.
pub const DEFAULT_HORIZON: usize = 10;

/// Factors carried into the future, in output column order.
///
/// Pest pressure is not a model input and is not projected.
pub const PROJECTED_FACTORS: [FactorKind; 5] = [
    FactorKind::Rainfall,
    FactorKind::Temperature,
    FactorKind::SoilIndex,
    FactorKind::Irrigation,
    FactorKind::Fertilizer,
];

/// Projected future factors plus the model's `baseline_yield_kg_ha`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BaselineResult {
    dataset: Dataset,
}

impl BaselineResult {
    /// Wrap a dataset that already carries a baseline yield column.
    ///
    /// # Errors
    ///
    /// `MissingBaselineColumn` when `baseline_yield_kg_ha` is absent.
    pub fn new(dataset: Dataset) -> Result<Self, ScenarioError> {
        if dataset.column(BASELINE_YIELD_COLUMN).is_none() {
            return Err(ScenarioError::MissingBaselineColumn(
                BASELINE_YIELD_COLUMN.to_string(),
            ));
        }
        Ok(Self { dataset })
    }

    /// Underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Projected years.
    pub fn years(&self) -> &[i32] {
        self.dataset.years()
    }

    /// Baseline yield per projected year.
    pub fn yields(&self) -> &[f64] {
        self.dataset.column(BASELINE_YIELD_COLUMN).unwrap_or(&[])
    }

    /// Consume into the underlying dataset.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Continues historical processes past the last observed year.
///
/// Trend terms use the elapsed periods since the first historical year, so
/// the trend runs on across the boundary. The soil walk starts at the
/// last historical soil value. Mean rainfall for the irrigation response is
/// taken from the historical window and held fixed.
///
/// # Examples
///
/// ```
/// use agri_core::rng::SimRng;
/// use agri_models::generator::HistoricalSeriesGenerator;
/// use agri_models::regression::fit_yield_model;
/// use agri_scenarios::projection::FutureBaselineProjector;
///
/// let mut rng = SimRng::from_seed(123);
/// let history = HistoricalSeriesGenerator::with_defaults().generate(&mut rng).unwrap();
/// let bundle = fit_yield_model(&history).unwrap();
///
/// let baseline = FutureBaselineProjector::with_defaults()
///     .project(&history, &bundle, &mut rng)
///     .unwrap();
/// assert_eq!(baseline.years().first(), Some(&2025));
/// assert_eq!(baseline.yields().len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct FutureBaselineProjector {
    params: ProcessParameters,
    horizon: usize,
}

impl FutureBaselineProjector {
    /// Create a projector.
    ///
    /// # Errors
    ///
    /// `EmptyHorizon` for a zero horizon, `Simulation` for invalid parameters.
    pub fn new(params: ProcessParameters, horizon: usize) -> Result<Self, ScenarioError> {
        if horizon == 0 {
            return Err(ScenarioError::EmptyHorizon);
        }
        params.validate()?;
        Ok(Self { params, horizon })
    }

    /// Ten-period projector with the default process parameters.
    pub fn with_defaults() -> Self {
        Self {
            params: ProcessParameters::default(),
            horizon: DEFAULT_HORIZON,
        }
    }

    /// Number of projected periods.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Process parameters.
    pub fn params(&self) -> &ProcessParameters {
        &self.params
    }

    /// Project the unmanaged future of `historical` and score it with `bundle`.
    ///
    /// # Errors
    ///
    /// - `Data` when the history is empty or lacks rainfall or soil index
    /// - `Model(MissingFeature)` when the bundle needs a column that is not
    ///   projected
    /// - `Model(Computation(NonFinite))` for a non-finite prediction
    pub fn project(
        &self,
        historical: &Dataset,
        bundle: &ModelBundle,
        rng: &mut SimRng,
    ) -> Result<BaselineResult, ScenarioError> {
        let last_year = historical.last_year().ok_or(DataError::Empty)?;
        let history_len = historical.len();
        let n = self.horizon;
        let p = &self.params;

        let historical_rainfall = historical.require(FactorKind::Rainfall.column_name())?;
        let mean_rainfall = mean(historical_rainfall).unwrap_or_default();
        let last_soil = historical
            .require(FactorKind::SoilIndex.column_name())?
            .last()
            .copied()
            .ok_or(DataError::Empty)?;

        let mut rainfall = trended_noisy_series(&p.rainfall.trend, history_len, n, rng);
        clip_factor(FactorKind::Rainfall, &mut rainfall);

        let temperature = trended_noisy_series(&p.temperature, history_len, n, rng);

        // The walk starts at the last observation itself.
        let mut soil = bounded_random_walk(
            last_soil,
            -p.soil.degradation_per_period,
            p.soil.noise_std,
            n,
            rng,
        );
        clip_factor(FactorKind::SoilIndex, &mut soil);

        let mut irrigation: Vec<f64> = (0..n)
            .map(|i| {
                let elapsed = (history_len + i) as f64;
                p.irrigation.level(elapsed, rainfall[i], mean_rainfall)
                    + rng.normal(0.0, p.irrigation.trend.noise_std)
            })
            .collect();
        clip_factor(FactorKind::Irrigation, &mut irrigation);

        let mut fertilizer: Vec<f64> = (0..n)
            .map(|i| {
                let elapsed = (history_len + i) as f64;
                p.fertilizer.level(elapsed, irrigation[i], soil[i])
                    + rng.normal(0.0, p.fertilizer.trend.noise_std)
            })
            .collect();
        clip_factor(FactorKind::Fertilizer, &mut fertilizer);

        let mut future = Dataset::with_start_year(last_year + 1, n);
        for (factor, values) in PROJECTED_FACTORS
            .into_iter()
            .zip([rainfall, temperature, soil, irrigation, fertilizer])
        {
            debug!(factor = %factor, periods = values.len(), "projected factor");
            future.push_series(FactorSeries::for_factor(factor, values))?;
        }

        let yields = bundle.predict(&future)?;
        future.push_series(FactorSeries::new(BASELINE_YIELD_COLUMN, yields))?;

        info!(
            first_year = last_year + 1,
            horizon = n,
            mean_rainfall,
            last_soil,
            "baseline future projected"
        );
        Ok(BaselineResult { dataset: future })
    }
}

fn clip_factor(factor: FactorKind, values: &mut [f64]) {
    if let Some(bounds) = factor.bounds() {
        clip_to_range(values, bounds.lower, bounds.upper);
    }
}
