//! Annual intervention rates per factor.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use agri_core::types::FactorKind;
use tracing::warn;

use crate::error::ScenarioError;

/// How a rate turns into a compounding multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateStyle {
    /// `(1 + r)^t`
    Growth,
    /// `(1 - r)^t`; a positive rate lowers the value
    Degradation,
}

/// A factor an intervention can adjust.
///
/// Keys are the short names used in rate tables (`rainfall`, `soil`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterventionFactor {
    /// Annual rainfall
    Rainfall,
    /// Mean temperature
    Temperature,
    /// Soil quality index
    Soil,
    /// Irrigation coverage
    Irrigation,
    /// Fertilizer application rate
    Fertilizer,
}

impl InterventionFactor {
    /// All adjustable factors, in application order.
    pub const ALL: [InterventionFactor; 5] = [
        Self::Rainfall,
        Self::Temperature,
        Self::Soil,
        Self::Irrigation,
        Self::Fertilizer,
    ];

    /// Rate table key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Rainfall => "rainfall",
            Self::Temperature => "temperature",
            Self::Soil => "soil",
            Self::Irrigation => "irrigation",
            Self::Fertilizer => "fertilizer",
        }
    }

    /// Dataset factor the rate applies to.
    pub fn factor(&self) -> FactorKind {
        match self {
            Self::Rainfall => FactorKind::Rainfall,
            Self::Temperature => FactorKind::Temperature,
            Self::Soil => FactorKind::SoilIndex,
            Self::Irrigation => FactorKind::Irrigation,
            Self::Fertilizer => FactorKind::Fertilizer,
        }
    }

    /// Compounding style. Soil is the only degradation-style factor.
    pub fn style(&self) -> RateStyle {
        match self {
            Self::Soil => RateStyle::Degradation,
            _ => RateStyle::Growth,
        }
    }

    /// Whether the adjusted series is clipped back to its physical bounds.
    ///
    /// Rainfall and temperature are left unclipped after an intervention.
    pub fn reclipped(&self) -> bool {
        matches!(self, Self::Soil | Self::Irrigation | Self::Fertilizer)
    }

    /// Multiplier for `rate` at zero-based horizon offset `t`.
    ///
    /// # Examples
    ///
    /// ```
    /// use agri_scenarios::interventions::InterventionFactor;
    ///
    /// assert_eq!(InterventionFactor::Irrigation.multiplier(0.01, 0), 1.0);
    /// assert!((InterventionFactor::Irrigation.multiplier(0.01, 2) - 1.0201).abs() < 1e-12);
    /// assert!((InterventionFactor::Soil.multiplier(0.01, 2) - 0.9801).abs() < 1e-12);
    /// ```
    pub fn multiplier(&self, rate: f64, t: usize) -> f64 {
        let base = match self.style() {
            RateStyle::Growth => 1.0 + rate,
            RateStyle::Degradation => 1.0 - rate,
        };
        base.powi(t as i32)
    }

    fn check(&self, rate: f64) -> Result<(), ScenarioError> {
        let reason = if !rate.is_finite() {
            Some("must be finite")
        } else {
            match self.style() {
                RateStyle::Growth if rate <= -1.0 => Some("must be greater than -1"),
                RateStyle::Degradation if rate >= 1.0 => Some("must be less than 1"),
                _ => None,
            }
        };
        match reason {
            Some(reason) => Err(ScenarioError::InvalidRate {
                factor: self.key().to_string(),
                rate,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for InterventionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InterventionFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Signed annual rates keyed by factor; absent factors have rate 0.
///
/// Immutable once built; the engine only reads it.
///
/// # Examples
///
/// ```
/// use agri_scenarios::interventions::{InterventionFactor, RateSpecification};
///
/// let rates = RateSpecification::from_entries([("irrigation", 0.02), ("pesticide", 0.5)]).unwrap();
/// assert_eq!(rates.rate(InterventionFactor::Irrigation), 0.02);
/// assert_eq!(rates.rate(InterventionFactor::Rainfall), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RateSpecification {
    rates: BTreeMap<InterventionFactor, f64>,
}

impl RateSpecification {
    /// All rates zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one rate, replacing any previous value.
    ///
    /// # Errors
    ///
    /// `InvalidRate` when the multiplier would be non-positive or non-finite.
    pub fn with_rate(mut self, factor: InterventionFactor, rate: f64) -> Result<Self, ScenarioError> {
        factor.check(rate)?;
        self.rates.insert(factor, rate);
        Ok(self)
    }

    /// Build from `(key, rate)` pairs. Unknown keys are logged and skipped.
    pub fn from_entries<K, I>(entries: I) -> Result<Self, ScenarioError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut spec = Self::new();
        for (key, rate) in entries {
            match key.as_ref().parse::<InterventionFactor>() {
                Ok(factor) => spec = spec.with_rate(factor, rate)?,
                Err(unknown) => warn!(key = %unknown, rate, "ignoring rate for unknown factor"),
            }
        }
        Ok(spec)
    }

    /// The canonical coordinated-improvement rates: +1% rainfall, -1%
    /// temperature, soil 0.01, +1% irrigation and unchanged fertilizer.
    pub fn best_case_1pct() -> Self {
        let rates = [
            (InterventionFactor::Rainfall, 0.01),
            (InterventionFactor::Temperature, -0.01),
            (InterventionFactor::Soil, 0.01),
            (InterventionFactor::Irrigation, 0.01),
            (InterventionFactor::Fertilizer, 0.0),
        ];
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Rate for `factor`, 0 when unspecified.
    pub fn rate(&self, factor: InterventionFactor) -> f64 {
        self.rates.get(&factor).copied().unwrap_or(0.0)
    }

    /// Explicitly specified rates, in factor order.
    pub fn iter(&self) -> impl Iterator<Item = (InterventionFactor, f64)> + '_ {
        self.rates.iter().map(|(f, r)| (*f, *r))
    }

    /// Check if every rate is zero.
    pub fn is_zero(&self) -> bool {
        self.rates.values().all(|r| *r == 0.0)
    }

    /// Rates multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, ScenarioError> {
        let mut out = Self::new();
        for (f, r) in self.iter() {
            out = out.with_rate(f, r * factor)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_keys_round_trip() {
        for f in InterventionFactor::ALL {
            assert_eq!(f.key().parse::<InterventionFactor>().unwrap(), f);
        }
        assert!("soil_index".parse::<InterventionFactor>().is_err());
    }

    #[test]
    fn test_soil_is_inverted() {
        // A positive soil rate shrinks the value; a positive irrigation rate grows it.
        assert!(InterventionFactor::Soil.multiplier(0.01, 5) < 1.0);
        assert!(InterventionFactor::Irrigation.multiplier(0.01, 5) > 1.0);
        assert_relative_eq!(
            InterventionFactor::Soil.multiplier(0.01, 5),
            0.99_f64.powi(5),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let spec = RateSpecification::from_entries([("rain", 0.1), ("fertilizer", -0.05)]).unwrap();
        assert_eq!(spec.iter().count(), 1);
        assert_eq!(spec.rate(InterventionFactor::Fertilizer), -0.05);
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let err = RateSpecification::new()
            .with_rate(InterventionFactor::Rainfall, -1.0)
            .unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidRate { ref factor, .. } if factor == "rainfall"));

        assert!(RateSpecification::new()
            .with_rate(InterventionFactor::Soil, 1.0)
            .is_err());
        assert!(RateSpecification::new()
            .with_rate(InterventionFactor::Temperature, f64::NAN)
            .is_err());
        assert!(RateSpecification::new()
            .with_rate(InterventionFactor::Soil, -0.5)
            .is_ok());
    }

    #[test]
    fn test_best_case_rates() {
        let spec = RateSpecification::best_case_1pct();
        assert_eq!(spec.rate(InterventionFactor::Rainfall), 0.01);
        assert_eq!(spec.rate(InterventionFactor::Temperature), -0.01);
        assert_eq!(spec.rate(InterventionFactor::Soil), 0.01);
        assert_eq!(spec.rate(InterventionFactor::Irrigation), 0.01);
        assert_eq!(spec.rate(InterventionFactor::Fertilizer), 0.0);
        assert!(!spec.is_zero());
        assert!(RateSpecification::new().is_zero());
    }

    #[test]
    fn test_scaled() {
        let doubled = RateSpecification::best_case_1pct().scaled(2.0).unwrap();
        assert_eq!(doubled.rate(InterventionFactor::Irrigation), 0.02);
        assert_eq!(doubled.rate(InterventionFactor::Temperature), -0.02);
    }
}
