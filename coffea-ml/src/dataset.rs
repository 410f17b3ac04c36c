//! Coffee market observations and the feature vectors the forecaster reads.

use std::fmt;
use std::str::FromStr;

use coffea_core::{CoffeaError, FeatureSource, Labeled};

/// The numeric attributes of a harvest year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Feature {
    /// Annual rainfall (mm).
    Rainfall,
    /// Mean temperature (°C).
    Temperature,
    /// Supply capacity (tonnes).
    Supply,
    /// Demand (tonnes).
    Demand,
}

impl Feature {
    /// All features, in the order the forecaster tries them.
    pub const ALL: [Feature; 4] = [
        Feature::Rainfall,
        Feature::Temperature,
        Feature::Supply,
        Feature::Demand,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Rainfall => "rainfall",
            Feature::Temperature => "temperature",
            Feature::Supply => "supply",
            Feature::Demand => "demand",
        }
    }

    /// Position in [`Feature::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = CoffeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoffeaError::Parse(format!("unknown feature: {s:?}")))
    }
}

/// Price category of a harvest year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PriceLevel {
    Low,
    Medium,
    High,
}

impl PriceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceLevel::Low => "low",
            PriceLevel::Medium => "medium",
            PriceLevel::High => "high",
        }
    }

    /// Human-readable forecast message.
    pub fn describe(&self) -> &'static str {
        match self {
            PriceLevel::Low => "Low price level",
            PriceLevel::Medium => "Medium price level",
            PriceLevel::High => "High price level",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceLevel {
    type Err = CoffeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PriceLevel::Low),
            "medium" => Ok(PriceLevel::Medium),
            "high" => Ok(PriceLevel::High),
            _ => Err(CoffeaError::Parse(format!("unknown price level: {s:?}"))),
        }
    }
}

/// One labeled harvest year.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Not used for splitting.
    pub year: i32,
    pub rainfall: f64,
    pub temperature: f64,
    pub supply: f64,
    pub demand: f64,
    pub price: PriceLevel,
}

impl Observation {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Rainfall => self.rainfall,
            Feature::Temperature => self.temperature,
            Feature::Supply => self.supply,
            Feature::Demand => self.demand,
        }
    }
}

impl FeatureSource<Feature> for Observation {
    fn feature(&self, feature: Feature) -> Option<f64> {
        let v = self.value(feature);
        (!v.is_nan()).then_some(v)
    }
}

impl Labeled for Observation {
    type Label = PriceLevel;

    fn label(&self) -> &PriceLevel {
        &self.price
    }
}

/// An unlabeled set of feature values; any feature may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureVector {
    values: [Option<f64>; 4],
}

impl FeatureVector {
    /// A vector with every feature present.
    pub fn new(rainfall: f64, temperature: f64, supply: f64, demand: f64) -> Self {
        Self {
            values: [
                Some(rainfall),
                Some(temperature),
                Some(supply),
                Some(demand),
            ],
        }
    }

    /// A vector with no features set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, value);
        self
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature.index()] = Some(value);
    }

    pub fn clear(&mut self, feature: Feature) {
        self.values[feature.index()] = None;
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values[feature.index()]
    }
}

impl From<&Observation> for FeatureVector {
    fn from(obs: &Observation) -> Self {
        Self::new(obs.rainfall, obs.temperature, obs.supply, obs.demand)
    }
}

impl FeatureSource<Feature> for FeatureVector {
    fn feature(&self, feature: Feature) -> Option<f64> {
        self.get(feature)
    }
}
