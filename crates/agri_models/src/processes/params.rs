//! Process parameters shared by historical generation and future projection.
//!
//! Both the generator and the projector evaluate the same deterministic
//! level functions defined here and add noise from the same standard
//! deviations, so the statistical shape of a factor is identical on both
//! sides of the historical/future boundary.
//!
//! Every process struct deserialises with `#[serde(default)]`, so a configuration
//! file only needs to name the values it overrides.

use crate::error::SimulationError;

/// Linear trend plus Gaussian noise: `base + trend_per_period · elapsed + N(0, σ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendNoise {
    /// Level at elapsed = 0
    pub base: f64,
    /// Change per period
    pub trend_per_period: f64,
    /// Noise standard deviation
    pub noise_std: f64,
}

impl TrendNoise {
    /// Create a new trend process.
    pub fn new(base: f64, trend_per_period: f64, noise_std: f64) -> Self {
        Self {
            base,
            trend_per_period,
            noise_std,
        }
    }

    /// Noise-free level after `elapsed` periods.
    #[inline]
    pub fn level(&self, elapsed: f64) -> f64 {
        self.base + self.trend_per_period * elapsed
    }

    fn validate(&self, name: &str) -> Result<(), SimulationError> {
        check_finite(&format!("{name}.base"), self.base)?;
        check_finite(&format!("{name}.trend_per_period"), self.trend_per_period)?;
        check_std(&format!("{name}.noise_std"), self.noise_std)
    }
}

/// Rainfall (mm): trended noisy series with discrete extreme years.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RainfallProcess {
    /// Trend and noise
    pub trend: TrendNoise,
    /// Number of distinct extreme years in a historical window
    pub extreme_events: usize,
    /// Magnitudes an extreme year draws from uniformly
    pub extreme_magnitudes: Vec<f64>,
}

impl Default for RainfallProcess {
    fn default() -> Self {
        Self {
            trend: TrendNoise::new(800.0, -3.0, 60.0),
            extreme_events: 2,
            extreme_magnitudes: vec![-150.0, 150.0],
        }
    }
}

/// Soil index: auto-regressive random walk with a degradation drift.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoilProcess {
    /// Value in the first historical period
    pub initial: f64,
    /// Loss per period (subtracted)
    pub degradation_per_period: f64,
    /// Step noise standard deviation
    pub noise_std: f64,
}

impl Default for SoilProcess {
    fn default() -> Self {
        Self {
            initial: 0.72,
            degradation_per_period: 0.003,
            noise_std: 0.005,
        }
    }
}

/// Irrigation coverage (%): trend plus a reaction to rainfall deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IrrigationProcess {
    /// Trend and noise
    pub trend: TrendNoise,
    /// Coverage change per mm of rainfall above the historical mean
    pub rainfall_sensitivity: f64,
}

impl IrrigationProcess {
    /// Noise-free coverage given this period's rainfall and the reference mean.
    #[inline]
    pub fn level(&self, elapsed: f64, rainfall: f64, mean_rainfall: f64) -> f64 {
        self.trend.level(elapsed) + self.rainfall_sensitivity * (rainfall - mean_rainfall)
    }
}

impl Default for IrrigationProcess {
    fn default() -> Self {
        Self {
            trend: TrendNoise::new(30.0, 1.0, 2.0),
            rainfall_sensitivity: -0.03,
        }
    }
}

/// Fertilizer rate (kg/ha): trend plus irrigation and soil terms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FertilizerProcess {
    /// Trend and noise
    pub trend: TrendNoise,
    /// kg/ha per % irrigation
    pub irrigation_effect: f64,
    /// kg/ha per unit of soil index above `soil_reference`
    pub soil_compensation: f64,
    /// Soil index at which the compensation term vanishes
    pub soil_reference: f64,
}

impl FertilizerProcess {
    /// Noise-free rate given this period's irrigation and soil index.
    #[inline]
    pub fn level(&self, elapsed: f64, irrigation: f64, soil: f64) -> f64 {
        self.trend.level(elapsed)
            + self.irrigation_effect * irrigation
            + self.soil_compensation * (soil - self.soil_reference)
    }
}

impl Default for FertilizerProcess {
    fn default() -> Self {
        Self {
            trend: TrendNoise::new(80.0, 1.2, 10.0),
            irrigation_effect: 0.8,
            soil_compensation: -60.0,
            soil_reference: 0.7,
        }
    }
}

/// Pest pressure index: uniform background with outbreak years.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PestProcess {
    /// Lower end of the background draw
    pub base_low: f64,
    /// Upper end of the background draw
    pub base_high: f64,
    /// Number of distinct outbreak years
    pub outbreaks: usize,
    /// Lower end of the outbreak boost
    pub boost_low: f64,
    /// Upper end of the outbreak boost
    pub boost_high: f64,
}

impl Default for PestProcess {
    fn default() -> Self {
        Self {
            base_low: 0.1,
            base_high: 0.5,
            outbreaks: 3,
            boost_low: 0.4,
            boost_high: 0.6,
        }
    }
}

/// Realised drivers of one period's yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldDrivers {
    /// Rainfall (mm)
    pub rainfall: f64,
    /// Temperature (°C)
    pub temperature: f64,
    /// Soil index
    pub soil: f64,
    /// Irrigation coverage (%)
    pub irrigation: f64,
    /// Fertilizer rate (kg/ha)
    pub fertilizer: f64,
    /// Pest pressure index
    pub pest: f64,
}

/// Yield (kg/ha): fixed linear response with a system-stress decline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct YieldProcess {
    /// Intercept (kg/ha)
    pub base: f64,
    /// kg/ha per mm rainfall
    pub rainfall_coeff: f64,
    /// kg/ha per soil index unit
    pub soil_coeff: f64,
    /// kg/ha per % irrigation
    pub irrigation_coeff: f64,
    /// kg/ha per kg/ha fertilizer
    pub fertilizer_coeff: f64,
    /// Temperature with no heat penalty (°C)
    pub reference_temperature: f64,
    /// kg/ha lost per °C above the reference
    pub temperature_coeff: f64,
    /// kg/ha lost at pest pressure 1
    pub pest_coeff: f64,
    /// kg/ha lost per elapsed period
    pub decline_per_period: f64,
    /// Noise standard deviation
    pub noise_std: f64,
}

impl YieldProcess {
    /// Noise-free yield for the given drivers after `elapsed` periods.
    #[inline]
    pub fn level(&self, elapsed: f64, d: &YieldDrivers) -> f64 {
        self.base + self.rainfall_coeff * d.rainfall
            + self.soil_coeff * d.soil
            + self.irrigation_coeff * d.irrigation
            + self.fertilizer_coeff * d.fertilizer
            - self.temperature_coeff * (d.temperature - self.reference_temperature)
            - self.pest_coeff * d.pest
            - self.decline_per_period * elapsed
    }
}

impl Default for YieldProcess {
    fn default() -> Self {
        Self {
            base: 2000.0,
            rainfall_coeff: 2.5,
            soil_coeff: 1200.0,
            irrigation_coeff: 15.0,
            fertilizer_coeff: 3.0,
            reference_temperature: 25.0,
            temperature_coeff: 120.0,
            pest_coeff: 800.0,
            decline_per_period: 15.0,
            noise_std: 150.0,
        }
    }
}

/// Complete parameter set for every factor process.
///
/// # Examples
///
/// ```
/// use agri_models::processes::ProcessParameters;
///
/// let params = ProcessParameters::default();
/// assert_eq!(params.rainfall.trend.base, 800.0);
/// assert_eq!(params.soil.initial, 0.72);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessParameters {
    /// Rainfall process
    pub rainfall: RainfallProcess,
    /// Temperature process (unclipped)
    pub temperature: TrendNoise,
    /// Soil index process
    pub soil: SoilProcess,
    /// Irrigation process
    pub irrigation: IrrigationProcess,
    /// Fertilizer process
    pub fertilizer: FertilizerProcess,
    /// Pest pressure process
    pub pest: PestProcess,
    /// Yield response
    #[cfg_attr(feature = "serde", serde(rename = "yield"))]
    pub yield_response: YieldProcess,
}

impl Default for ProcessParameters {
    fn default() -> Self {
        Self {
            rainfall: RainfallProcess::default(),
            temperature: TrendNoise::new(25.0, 0.03, 0.4),
            soil: SoilProcess::default(),
            irrigation: IrrigationProcess::default(),
            fertilizer: FertilizerProcess::default(),
            pest: PestProcess::default(),
            yield_response: YieldProcess::default(),
        }
    }
}

impl ProcessParameters {
    /// Check that every parameter is usable.
    ///
    /// Noise scales must be finite and non-negative, uniform ranges ordered,
    /// and a positive extreme-event count needs at least one magnitude.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.rainfall.trend.validate("rainfall.trend")?;
        if self.rainfall.extreme_events > 0 && self.rainfall.extreme_magnitudes.is_empty() {
            return Err(SimulationError::EmptyShockChoices);
        }
        for m in &self.rainfall.extreme_magnitudes {
            check_finite("rainfall.extreme_magnitudes", *m)?;
        }

        self.temperature.validate("temperature")?;

        check_finite("soil.initial", self.soil.initial)?;
        check_finite("soil.degradation_per_period", self.soil.degradation_per_period)?;
        check_std("soil.noise_std", self.soil.noise_std)?;

        self.irrigation.trend.validate("irrigation.trend")?;
        check_finite("irrigation.rainfall_sensitivity", self.irrigation.rainfall_sensitivity)?;

        self.fertilizer.trend.validate("fertilizer.trend")?;
        check_finite("fertilizer.irrigation_effect", self.fertilizer.irrigation_effect)?;
        check_finite("fertilizer.soil_compensation", self.fertilizer.soil_compensation)?;

        check_range("pest.base", self.pest.base_low, self.pest.base_high)?;
        check_range("pest.boost", self.pest.boost_low, self.pest.boost_high)?;

        check_std("yield.noise_std", self.yield_response.noise_std)?;
        Ok(())
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(name, format!("must be finite, got {value}")))
    }
}

fn check_std(name: &str, value: f64) -> Result<(), SimulationError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(SimulationError::invalid(name, format!("must be non-negative, got {value}")));
    }
    Ok(())
}

fn check_range(name: &str, low: f64, high: f64) -> Result<(), SimulationError> {
    check_finite(name, low)?;
    check_finite(name, high)?;
    if low > high {
        return Err(SimulationError::invalid(
            name,
            format!("low {low} exceeds high {high}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trend_level() {
        let t = TrendNoise::new(800.0, -3.0, 60.0);
        assert_eq!(t.level(0.0), 800.0);
        assert_eq!(t.level(25.0), 725.0);
    }

    #[test]
    fn test_irrigation_reacts_to_dry_years() {
        let p = IrrigationProcess::default();
        let dry = p.level(10.0, 600.0, 750.0);
        let wet = p.level(10.0, 900.0, 750.0);
        assert_relative_eq!(dry, 30.0 + 10.0 + 4.5, epsilon = 1e-12);
        assert!(dry > wet);
    }

    #[test]
    fn test_fertilizer_compensates_poor_soil() {
        let p = FertilizerProcess::default();
        let poor = p.level(0.0, 40.0, 0.6);
        let rich = p.level(0.0, 40.0, 0.8);
        assert_relative_eq!(poor, 80.0 + 32.0 + 6.0, epsilon = 1e-12);
        assert!(poor > rich);
    }

    #[test]
    fn test_yield_level_reference_point() {
        let p = YieldProcess::default();
        let d = YieldDrivers {
            rainfall: 800.0,
            temperature: 25.0,
            soil: 0.7,
            irrigation: 40.0,
            fertilizer: 120.0,
            pest: 0.0,
        };
        // 2000 + 2000 + 840 + 600 + 360
        assert_relative_eq!(p.level(0.0, &d), 5800.0, epsilon = 1e-9);
        assert_relative_eq!(p.level(10.0, &d), 5650.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate_rejects_negative_noise() {
        let mut params = ProcessParameters::default();
        params.soil.noise_std = -0.1;
        let err = params.validate().unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter { ref name, .. } if name == "soil.noise_std"));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut params = ProcessParameters::default();
        params.pest.boost_low = 0.9;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_requires_magnitudes() {
        let mut params = ProcessParameters::default();
        params.rainfall.extreme_magnitudes.clear();
        assert_eq!(params.validate().unwrap_err(), SimulationError::EmptyShockChoices);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_override() {
        let params: ProcessParameters = toml::from_str(
            r#"
            [soil]
            initial = 0.80

            [yield]
            noise_std = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(params.soil.initial, 0.80);
        assert_eq!(params.soil.degradation_per_period, 0.003);
        assert_eq!(params.yield_response.noise_std, 0.0);
        assert_eq!(params.rainfall, RainfallProcess::default());
    }
}
