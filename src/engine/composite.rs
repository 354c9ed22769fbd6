//! Composite scoring engine

use super::readings::{check_finite, validate_finite};
use super::weights::WeightConfig;
use crate::error::Result;
use crate::scorer::{score_value, CurveSet};
use crate::{AreaFailure, ComparisonTable, Metric, MetricValues, ScoreResult, Tier};
use serde_json::Value;
use std::collections::BTreeMap;

/// Scores areas against one immutable weight configuration and curve set.
///
/// Every call is a pure computation over the engine's own configuration, so a
/// shared `&ScoringEngine` can be used from many threads at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringEngine {
    weights: WeightConfig,
    curves: CurveSet,
}

impl ScoringEngine {
    /// Create an engine with the default weights and curves
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom weight configuration
    pub fn with_weights(mut self, weights: WeightConfig) -> Self {
        self.weights = weights;
        self
    }

    /// Use regional scoring curves
    pub fn with_curves(mut self, curves: CurveSet) -> Self {
        self.curves = curves;
        self
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    /// Full-precision 0-100 score for one metric value. NaN and infinite
    /// values are validation errors.
    pub fn score_metric(&self, metric: Metric, value: f64) -> Result<f64> {
        check_finite(metric, value)?;
        Ok(score_value(value, self.curves.get(metric)))
    }

    /// Score one area from loosely-typed readings (a JSON object of metric
    /// name to number). Missing, unknown or non-numeric metrics are
    /// validation errors.
    pub fn calculate_composite_score(
        &self,
        area_name: &str,
        readings: &Value,
    ) -> Result<ScoreResult> {
        let values = MetricValues::from_json(readings)?;
        self.score_readings(area_name, &values)
    }

    /// Score one area from typed readings
    pub fn score_readings(
        &self,
        area_name: &str,
        readings: &MetricValues,
    ) -> Result<ScoreResult> {
        validate_finite(readings)?;

        let sub_scores = MetricValues::from_fn(|m| score_value(readings[m], self.curves.get(m)));
        let contributions = MetricValues::from_fn(|m| sub_scores[m] * self.weights.get(m));
        let composite_score = round1(aggregate(&sub_scores, &self.weights));
        let tier = Tier::from_score(composite_score);

        tracing::debug!(area = area_name, composite_score, %tier, "scored area");

        Ok(ScoreResult {
            area_name: area_name.to_string(),
            raw_values: *readings,
            sub_scores: MetricValues::from_fn(|m| round1(sub_scores[m])),
            weights: *self.weights.values(),
            contributions,
            composite_score,
            tier,
        })
    }

    /// Score every area independently and rank the successes.
    ///
    /// A bad area never stops the others: its error is collected in
    /// [`ComparisonTable::failures`].
    pub fn compare_areas(&self, areas: &BTreeMap<String, Value>) -> ComparisonTable {
        let outcomes = areas
            .iter()
            .map(|(name, readings)| (name.clone(), self.calculate_composite_score(name, readings)))
            .collect();
        build_table(outcomes)
    }

    /// Same as [`compare_areas`](Self::compare_areas), scoring areas in parallel
    /// using rayon. The resulting table is identical.
    pub fn compare_areas_parallel(&self, areas: &BTreeMap<String, Value>) -> ComparisonTable {
        use rayon::prelude::*;

        let outcomes = areas
            .par_iter()
            .map(|(name, readings)| (name.clone(), self.calculate_composite_score(name, readings)))
            .collect();
        build_table(outcomes)
    }
}

/// Weighted sum of sub-scores, clamped to 0-100
pub fn aggregate(sub_scores: &MetricValues, weights: &WeightConfig) -> f64 {
    Metric::ALL
        .iter()
        .map(|&m| sub_scores[m] * weights.get(m))
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn build_table(outcomes: Vec<(String, Result<ScoreResult>)>) -> ComparisonTable {
    let mut table = ComparisonTable::default();
    for (area_name, outcome) in outcomes {
        match outcome {
            Ok(result) => table.results.push(result),
            Err(error) => {
                tracing::warn!(area = %area_name, %error, "area could not be scored");
                table.failures.push(AreaFailure { area_name, error });
            }
        }
    }

    table.results.sort_by(|a, b| {
        b.composite_score
            .total_cmp(&a.composite_score)
            .then_with(|| a.area_name.cmp(&b.area_name))
    });
    table.failures.sort_by(|a, b| a.area_name.cmp(&b.area_name));
    table
}
