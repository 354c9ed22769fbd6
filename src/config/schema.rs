//! Config schema and deserialization

use crate::engine::{ScoringEngine, Strategy, WeightConfig};
use crate::error::ConfigurationError;
use crate::scorer::{CurveSet, CurveSpec, ScoringCurve};
use crate::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root config structure for .propscorerc.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Weight preset. Ignored when `weights` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,

    /// Explicit weights keyed by metric name (must cover all five, sum to 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,

    /// Regional curve replacements keyed by metric name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub curves: BTreeMap<String, CurveSpec>,

    /// Minimum composite score (exit 1 if below). Default: none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence; a CLI
    /// strategy also discards weights inherited from the file.
    pub fn merge_with_cli(mut self, threshold: Option<f64>, strategy: Option<Strategy>) -> Self {
        if threshold.is_some() {
            self.threshold = threshold;
        }
        if strategy.is_some() {
            self.strategy = strategy;
            self.weights = None;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        // A child that picks a strategy should not inherit explicit weights
        if self.weights.is_none() && self.strategy.is_none() {
            self.weights = base.weights;
            self.strategy = base.strategy;
        }
        for (metric, curve) in base.curves {
            self.curves.entry(metric).or_insert(curve);
        }
    }

    /// Resolve the weight configuration: explicit weights, else strategy, else default
    pub fn weight_config(&self) -> Result<WeightConfig, ConfigurationError> {
        match (&self.weights, self.strategy) {
            (Some(weights), _) => WeightConfig::from_map(weights.iter().map(|(k, v)| (k, *v))),
            (None, Some(strategy)) => Ok(WeightConfig::for_strategy(strategy)),
            (None, None) => Ok(WeightConfig::default()),
        }
    }

    /// Default curves with any configured regional replacements applied
    pub fn curve_set(&self) -> Result<CurveSet, ConfigurationError> {
        let mut set = CurveSet::default();
        for (key, spec) in &self.curves {
            let metric = Metric::from_key(key)
                .ok_or_else(|| ConfigurationError::UnknownMetric(key.clone()))?;
            let curve = ScoringCurve::try_from(spec.clone()).map_err(|e| {
                ConfigurationError::Curve {
                    metric: key.clone(),
                    source: Box::new(e),
                }
            })?;
            set = set.with_curve(metric, curve);
        }
        Ok(set)
    }

    /// Build an engine. Fails before any scoring if weights or curves are invalid.
    pub fn build_engine(&self) -> Result<ScoringEngine, ConfigurationError> {
        let engine = ScoringEngine::new()
            .with_weights(self.weight_config()?)
            .with_curves(self.curve_set()?);
        tracing::debug!(
            strategy = ?self.strategy,
            explicit_weights = self.weights.is_some(),
            regional_curves = self.curves.len(),
            "built scoring engine"
        );
        Ok(engine)
    }
}
