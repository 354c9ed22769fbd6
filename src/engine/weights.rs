//! Weight configuration and investment-strategy presets

use crate::error::ConfigurationError;
use crate::{Metric, MetricValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Absorbs floating-point drift when summing decimal weights like 0.151
const SUM_SLACK: f64 = 1e-9;

/// Named weight presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Even split between growth and yield (default)
    #[default]
    Balanced,
    /// Cash flow and stability first
    Conservative,
    /// Growth potential and supply pressure first
    Aggressive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Balanced,
        Strategy::Conservative,
        Strategy::Aggressive,
    ];

    /// Weights in canonical metric order
    fn weights(self) -> [f64; 5] {
        match self {
            Strategy::Balanced => [0.25, 0.25, 0.20, 0.15, 0.15],
            Strategy::Conservative => [0.15, 0.35, 0.15, 0.20, 0.15],
            Strategy::Aggressive => [0.40, 0.15, 0.25, 0.10, 0.10],
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Balanced => write!(f, "balanced"),
            Strategy::Conservative => write!(f, "conservative"),
            Strategy::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown strategy '{s}' (use balanced, conservative or aggressive)")
            })
    }
}

/// Per-metric weights. Immutable once built; always sums to 1.0 within
/// [`WEIGHT_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<Metric, f64>"
)]
pub struct WeightConfig {
    weights: MetricValues,
}

impl WeightConfig {
    /// Validate weights given in canonical metric order
    pub fn new(weights: MetricValues) -> Result<Self, ConfigurationError> {
        for (metric, weight) in weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    metric: metric.key().to_string(),
                    weight,
                });
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE + SUM_SLACK {
            return Err(ConfigurationError::WeightSum {
                sum,
                tolerance: WEIGHT_TOLERANCE,
            });
        }

        Ok(Self { weights })
    }

    /// Build from metric-name keys. The key set must be exactly the five metrics.
    pub fn from_map<I, K>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut found: BTreeMap<Metric, f64> = BTreeMap::new();
        let mut unknown = Vec::new();
        for (key, weight) in pairs {
            let key = key.as_ref();
            match Metric::from_key(key) {
                Some(metric) => {
                    found.insert(metric, weight);
                }
                None => unknown.push(key.to_string()),
            }
        }

        let missing: Vec<String> = Metric::ALL
            .iter()
            .filter(|m| !found.contains_key(m))
            .map(|m| m.key().to_string())
            .collect();

        if !missing.is_empty() || !unknown.is_empty() {
            unknown.sort();
            return Err(ConfigurationError::WeightKeys { missing, unknown });
        }

        Self::new(MetricValues::from_fn(|m| found[&m]))
    }

    pub fn for_strategy(strategy: Strategy) -> Self {
        Self {
            weights: MetricValues::new(strategy.weights()),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.weights[metric]
    }

    pub fn values(&self) -> &MetricValues {
        &self.weights
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::for_strategy(Strategy::Balanced)
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightConfig {
    type Error = ConfigurationError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

impl From<WeightConfig> for BTreeMap<Metric, f64> {
    fn from(config: WeightConfig) -> Self {
        config.weights.into()
    }
}
