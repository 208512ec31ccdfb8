//! Named scenarios and ready-made interventions.

use super::rates::RateSpecification;

/// A named rate specification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    name: String,
    description: String,
    rates: RateSpecification,
}

impl Scenario {
    /// Create a scenario with a description.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rates: RateSpecification,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rates,
        }
    }

    /// Create a scenario without a description.
    pub fn named(name: impl Into<String>, rates: RateSpecification) -> Self {
        Self::new(name, String::new(), rates)
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scenario description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rates applied by this scenario.
    pub fn rates(&self) -> &RateSpecification {
        &self.rates
    }
}

/// Ready-made interventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetIntervention {
    /// All rates zero; reproduces the baseline
    NoIntervention,
    /// Coordinated 1% yearly improvement
    BestCase1Pct,
}

impl PresetIntervention {
    /// All presets.
    pub const ALL: [PresetIntervention; 2] = [Self::NoIntervention, Self::BestCase1Pct];

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoIntervention => "no_intervention",
            Self::BestCase1Pct => "best_case_1pct",
        }
    }

    /// Description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoIntervention => "Baseline trajectory without any adjustment",
            Self::BestCase1Pct => {
                "Rainfall, soil and irrigation +1% per year, temperature -1% per year, fertilizer unchanged"
            }
        }
    }

    /// Rates of the preset.
    pub fn rates(&self) -> RateSpecification {
        match self {
            Self::NoIntervention => RateSpecification::new(),
            Self::BestCase1Pct => RateSpecification::best_case_1pct(),
        }
    }

    /// The preset as a named scenario.
    pub fn scenario(&self) -> Scenario {
        Scenario::new(self.name(), self.description(), self.rates())
    }

    /// Look up a preset by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}
