//! Propscore: investment-attractiveness scoring for real-estate markets
//!
//! This library turns five raw market indicators for an area into a composite
//! 0-100 score and a letter tier, using per-metric piecewise scoring curves and
//! a weighted sum.

pub mod config;
pub mod engine;
pub mod error;
pub mod reporter;
pub mod scorer;

pub use engine::{ScoringEngine, Strategy, WeightConfig};
pub use error::{ConfigurationError, Error, Result, ValidationError};
pub use scorer::{Breakpoint, CurveSet, ScoringCurve};

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Index;

/// Sub-scores below this value are flagged as needing attention
pub const ATTENTION_THRESHOLD: f64 = 60.0;

/// The five market indicators, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Annual population growth (%) - demand
    PopulationGrowth,
    /// Gross rental yield (%) - return
    RentalYield,
    /// New dwelling supply as a share of stock (%) - supply pressure
    SupplyRatio,
    /// Rental vacancy rate (%) - market tightness
    VacancyRate,
    /// Share of income spent on mortgage repayments (%) - affordability
    MortgageStress,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::PopulationGrowth,
        Metric::RentalYield,
        Metric::SupplyRatio,
        Metric::VacancyRate,
        Metric::MortgageStress,
    ];

    /// Snake-case identifier used in input files and serialized output
    pub fn key(self) -> &'static str {
        match self {
            Metric::PopulationGrowth => "population_growth",
            Metric::RentalYield => "rental_yield",
            Metric::SupplyRatio => "supply_ratio",
            Metric::VacancyRate => "vacancy_rate",
            Metric::MortgageStress => "mortgage_stress",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Metric::PopulationGrowth => "Population Growth",
            Metric::RentalYield => "Rental Yield",
            Metric::SupplyRatio => "Supply Ratio",
            Metric::VacancyRate => "Vacancy Rate",
            Metric::MortgageStress => "Mortgage Stress",
        }
    }

    /// Short tag for the market dimension this metric measures
    pub fn dimension(self) -> &'static str {
        match self {
            Metric::PopulationGrowth => "DEMAND",
            Metric::RentalYield => "RETURN",
            Metric::SupplyRatio => "SUPPLY",
            Metric::VacancyRate => "STABLE",
            Metric::MortgageStress => "AFFORD",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whether a higher raw value is better or worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Higher raw value scores higher
    Ascending,
    /// Higher raw value scores lower
    Descending,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

/// One number per metric. Serialized as an object keyed by metric name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Metric, f64>",
    into = "BTreeMap<Metric, f64>"
)]
pub struct MetricValues {
    values: [f64; 5],
}

impl MetricValues {
    /// Build from values in canonical metric order
    pub const fn new(values: [f64; 5]) -> Self {
        Self { values }
    }

    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        let mut values = [0.0; 5];
        for metric in Metric::ALL {
            values[metric.index()] = f(metric);
        }
        Self { values }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl Index<Metric> for MetricValues {
    type Output = f64;

    fn index(&self, metric: Metric) -> &f64 {
        &self.values[metric.index()]
    }
}

impl TryFrom<BTreeMap<Metric, f64>> for MetricValues {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<Metric, f64>) -> std::result::Result<Self, Self::Error> {
        let missing: Vec<String> = Metric::ALL
            .iter()
            .filter(|m| !map.contains_key(m))
            .map(|m| m.key().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MetricKeys {
                missing,
                unknown: Vec::new(),
            });
        }
        Ok(Self::from_fn(|m| map[&m]))
    }
}

impl From<MetricValues> for BTreeMap<Metric, f64> {
    fn from(values: MetricValues) -> Self {
        values.iter().collect()
    }
}

/// Investment tier derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Lower bounds are inclusive: a score on a boundary belongs to the higher tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Tier::S
        } else if score >= 75.0 {
            Tier::A
        } else if score >= 65.0 {
            Tier::B
        } else if score >= 50.0 {
            Tier::C
        } else {
            Tier::D
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "Excellent",
            Tier::A => "Good",
            Tier::B => "Above Average",
            Tier::C => "Average",
            Tier::D => "Below Average",
        }
    }

    /// Short action plus a one-line rationale
    pub fn recommendation(self) -> (&'static str, &'static str) {
        match self {
            Tier::S => (
                "STRONG BUY",
                "Area shows excellent performance with high investment value",
            ),
            Tier::A => ("BUY", "Area shows good performance, worth serious consideration"),
            Tier::B => (
                "HOLD",
                "Area shows above average performance, further analysis recommended",
            ),
            Tier::C => (
                "CAUTION",
                "Area shows average performance, careful risk assessment needed",
            ),
            Tier::D => ("AVOID", "Area shows weak performance, consider other locations"),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::S => write!(f, "S"),
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
            Tier::D => write!(f, "D"),
        }
    }
}

/// The outcome of scoring one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub area_name: String,
    /// Raw indicator values as supplied
    pub raw_values: MetricValues,
    /// Per-metric scores (0-100, one decimal)
    pub sub_scores: MetricValues,
    /// Weights the composite was computed with
    pub weights: MetricValues,
    /// Full-precision weighted contribution of each metric. Sums to the
    /// composite before rounding.
    pub contributions: MetricValues,
    /// Weighted composite (0-100, one decimal)
    pub composite_score: f64,
    pub tier: Tier,
}

impl ScoreResult {
    /// Points this metric adds to the composite
    pub fn contribution(&self, metric: Metric) -> f64 {
        self.contributions[metric]
    }

    /// Metrics scoring below [`ATTENTION_THRESHOLD`]
    pub fn weak_metrics(&self) -> Vec<Metric> {
        self.sub_scores
            .iter()
            .filter(|(_, score)| *score < ATTENTION_THRESHOLD)
            .map(|(metric, _)| metric)
            .collect()
    }
}

/// An area that could not be scored in a batch comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaFailure {
    pub area_name: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: Error,
}

/// Ranked results of a multi-area comparison plus the areas that failed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    /// Sorted by composite score descending, then area name ascending
    pub results: Vec<ScoreResult>,
    pub failures: Vec<AreaFailure>,
}

impl ComparisonTable {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn top(&self) -> Option<&ScoreResult> {
        self.results.first()
    }

    /// Flat rows for tabular export; rank is 1-based
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, r)| ComparisonRow {
                rank: i + 1,
                area_name: r.area_name.clone(),
                sub_scores: r.sub_scores,
                composite_score: r.composite_score,
                tier: r.tier,
            })
            .collect()
    }
}

/// One exported row of a comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub rank: usize,
    pub area_name: String,
    pub sub_scores: MetricValues,
    pub composite_score: f64,
    pub tier: Tier,
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
