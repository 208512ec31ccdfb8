//! Factor identities, physical bounds and generation precision.
//!
//! Every simulated variable is a [`FactorKind`]. A factor knows the name of
//! its dataset column, the physical interval its values must lie in after
//! generation, and the number of decimals kept when a historical dataset is
//! materialised.

use std::fmt;
use std::str::FromStr;

use super::error::DataError;

/// Name of the period column shared by every dataset.
pub const YEAR_COLUMN: &str = "year";

/// Name of the yield column produced by the baseline projector.
pub const BASELINE_YIELD_COLUMN: &str = "baseline_yield_kg_ha";

/// Name of the yield column produced by the intervention engine.
pub const SCENARIO_YIELD_COLUMN: &str = "scenario_yield_kg_ha";

/// Closed physical interval a factor's values are clipped into.
///
/// `upper == None` means the factor is unbounded above.
///
/// # Examples
/// ```
/// use agri_core::types::PhysicalBounds;
///
/// let rainfall = PhysicalBounds::at_least(300.0);
/// assert_eq!(rainfall.clip(120.0), 300.0);
/// assert_eq!(rainfall.clip(2500.0), 2500.0);
///
/// let soil = PhysicalBounds::between(0.5, 0.85);
/// assert!(soil.contains(0.72));
/// assert!(!soil.contains(0.9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalBounds {
    /// Inclusive lower bound
    pub lower: f64,
    /// Inclusive upper bound, `None` when unbounded above
    pub upper: Option<f64>,
}

impl PhysicalBounds {
    /// Bounds with both ends closed.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    /// Bounds with only a floor.
    pub fn at_least(lower: f64) -> Self {
        Self { lower, upper: None }
    }

    /// Clamp a single value into the interval.
    #[inline]
    pub fn clip(&self, value: f64) -> f64 {
        let floored = value.max(self.lower);
        match self.upper {
            Some(upper) => floored.min(upper),
            None => floored,
        }
    }

    /// Clamp every value of a slice in place.
    pub fn clip_slice(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = self.clip(*value);
        }
    }

    /// Check whether a value lies inside the interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value <= upper)
    }
}

impl fmt::Display for PhysicalBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {}]", self.lower, upper),
            None => write!(f, "[{}, inf)", self.lower),
        }
    }
}

/// Environmental, management and outcome variables of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FactorKind {
    /// Annual rainfall (mm)
    Rainfall,
    /// Mean growing-season temperature (°C)
    Temperature,
    /// Soil quality index (dimensionless)
    SoilIndex,
    /// Irrigated share of cropland (%)
    Irrigation,
    /// Fertilizer application rate (kg/ha)
    Fertilizer,
    /// Pest pressure index in [0, 1]
    PestPressure,
    /// Crop yield (kg/ha)
    Yield,
}

impl FactorKind {
    /// All factors in generation order.
    pub const ALL: [FactorKind; 7] = [
        FactorKind::Rainfall,
        FactorKind::Temperature,
        FactorKind::SoilIndex,
        FactorKind::Irrigation,
        FactorKind::Fertilizer,
        FactorKind::PestPressure,
        FactorKind::Yield,
    ];

    /// Dataset column name.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Rainfall => "rainfall_mm",
            Self::Temperature => "temperature_c",
            Self::SoilIndex => "soil_index",
            Self::Irrigation => "irrigation_pct",
            Self::Fertilizer => "fertilizer_kg_ha",
            Self::PestPressure => "pest_pressure_index",
            Self::Yield => "yield_kg_ha",
        }
    }

    /// Physical interval values are clipped into, `None` for unclipped factors.
    pub fn bounds(&self) -> Option<PhysicalBounds> {
        match self {
            Self::Rainfall => Some(PhysicalBounds::at_least(300.0)),
            Self::Temperature => None,
            Self::SoilIndex => Some(PhysicalBounds::between(0.5, 0.85)),
            Self::Irrigation => Some(PhysicalBounds::between(30.0, 70.0)),
            Self::Fertilizer => Some(PhysicalBounds::between(50.0, 200.0)),
            Self::PestPressure => Some(PhysicalBounds::between(0.0, 1.0)),
            Self::Yield => Some(PhysicalBounds::at_least(0.0)),
        }
    }

    /// Decimals kept when a historical dataset is materialised.
    pub fn decimals(&self) -> u32 {
        match self {
            Self::Rainfall | Self::Irrigation | Self::Fertilizer => 1,
            Self::Temperature | Self::PestPressure => 2,
            Self::SoilIndex => 3,
            Self::Yield => 0,
        }
    }

    /// Look a factor up by its column name.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for FactorKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column_name(s).ok_or_else(|| DataError::UnknownFactor(s.to_string()))
    }
}

/// Round to a fixed number of decimals.
///
/// # Examples
/// ```
/// use agri_core::types::round_to_decimals;
///
/// assert_eq!(round_to_decimals(812.3456, 1), 812.3);
/// assert_eq!(round_to_decimals(0.71249, 3), 0.712);
/// assert_eq!(round_to_decimals(4231.6, 0), 4232.0);
/// ```
#[inline]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clip_closed() {
        let b = PhysicalBounds::between(30.0, 70.0);
        assert_eq!(b.clip(10.0), 30.0);
        assert_eq!(b.clip(45.5), 45.5);
        assert_eq!(b.clip(99.0), 70.0);
    }

    #[test]
    fn test_bounds_clip_open_above() {
        let b = PhysicalBounds::at_least(0.0);
        assert_eq!(b.clip(-5.0), 0.0);
        assert_eq!(b.clip(1e9), 1e9);
        assert!(b.contains(1e12));
    }

    #[test]
    fn test_bounds_clip_slice() {
        let b = PhysicalBounds::between(0.5, 0.85);
        let mut values = vec![0.4, 0.6, 0.9];
        b.clip_slice(&mut values);
        assert_eq!(values, vec![0.5, 0.6, 0.85]);
    }

    #[test]
    fn test_bounds_display() {
        assert_eq!(PhysicalBounds::between(0.0, 1.0).to_string(), "[0, 1]");
        assert_eq!(PhysicalBounds::at_least(300.0).to_string(), "[300, inf)");
    }

    #[test]
    fn test_factor_column_round_trip() {
        for factor in FactorKind::ALL {
            assert_eq!(FactorKind::from_column_name(factor.column_name()), Some(factor));
            assert_eq!(factor.column_name().parse::<FactorKind>().unwrap(), factor);
        }
    }

    #[test]
    fn test_factor_unknown_name() {
        let err = "humidity_pct".parse::<FactorKind>().unwrap_err();
        assert_eq!(err, DataError::UnknownFactor("humidity_pct".to_string()));
    }

    #[test]
    fn test_temperature_is_unclipped() {
        assert!(FactorKind::Temperature.bounds().is_none());
    }

    #[test]
    fn test_declared_bounds() {
        assert_eq!(
            FactorKind::Fertilizer.bounds(),
            Some(PhysicalBounds::between(50.0, 200.0))
        );
        assert_eq!(
            FactorKind::Rainfall.bounds(),
            Some(PhysicalBounds::at_least(300.0))
        );
    }

    #[test]
    fn test_rounding_precision() {
        assert_eq!(FactorKind::SoilIndex.decimals(), 3);
        assert_eq!(FactorKind::Yield.decimals(), 0);
        assert_eq!(round_to_decimals(25.456, FactorKind::Temperature.decimals()), 25.46);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_factor_serde_snake_case() {
        let json = serde_json::to_string(&FactorKind::PestPressure).unwrap();
        assert_eq!(json, "\"pest_pressure\"");
        let parsed: FactorKind = serde_json::from_str("\"soil_index\"").unwrap();
        assert_eq!(parsed, FactorKind::SoilIndex);
    }
}
