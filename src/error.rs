//! Error types for scoring operations

use thiserror::Error;

/// Calibration or weight setup mistakes. Raised before any scoring happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error(
        "weights must cover exactly the five metrics (missing: [{}], unknown: [{}])",
        .missing.join(", "),
        .unknown.join(", ")
    )]
    WeightKeys {
        missing: Vec<String>,
        unknown: Vec<String>,
    },
    #[error("weight for {metric} must be a finite non-negative number, got {weight}")]
    InvalidWeight { metric: String, weight: f64 },
    #[error("weights must sum to 1.0 (±{tolerance}), currently {sum:.4}")]
    WeightSum { sum: f64, tolerance: f64 },
    #[error("scoring curve needs at least 2 breakpoints, got {0}")]
    TooFewBreakpoints(usize),
    #[error("breakpoint {index} is not finite")]
    NonFiniteBreakpoint { index: usize },
    #[error("breakpoint thresholds must be strictly increasing (breakpoint {index})")]
    NonMonotonicThresholds { index: usize },
    #[error("breakpoint {index} score {score} is outside 0-100")]
    ScoreOutOfRange { index: usize, score: f64 },
    #[error("{direction} curve scores must move with the direction (breakpoint {index})")]
    NonMonotonicScores { direction: String, index: usize },
    #[error("unknown metric in configuration: {0}")]
    UnknownMetric(String),
    #[error("invalid curve for {metric}: {source}")]
    Curve {
        metric: String,
        #[source]
        source: Box<ConfigurationError>,
    },
}

/// Malformed per-area input. Scoped to the single area being scored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("readings must be an object of metric name to number")]
    NotAnObject,
    /// Missing keys in metric order, unknown keys sorted. At least one is non-empty.
    #[error("{}", describe_keys(.missing, .unknown))]
    MetricKeys {
        missing: Vec<String>,
        unknown: Vec<String>,
    },
    #[error("metric {metric} is not numeric: {value}")]
    NonNumeric { metric: String, value: String },
    #[error("metric {metric} is not a finite number: {value}")]
    NonFinite { metric: String, value: f64 },
}

/// Any failure surfaced by the library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn describe_keys(missing: &[String], unknown: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing metric(s): {}", missing.join(", ")));
    }
    if !unknown.is_empty() {
        parts.push(format!("unknown metric(s): {}", unknown.join(", ")));
    }
    parts.join("; ")
}

/// A specialized Result type for scoring operations
pub type Result<T> = std::result::Result<T, Error>;
