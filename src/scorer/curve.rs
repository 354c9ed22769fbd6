//! Scoring curves: ordered breakpoint tables per metric

use crate::error::ConfigurationError;
use crate::{Direction, Metric};
use serde::{Deserialize, Serialize};

/// A calibration point: the score awarded at exactly `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Breakpoint {
    pub threshold: f64,
    pub score: f64,
}

impl Breakpoint {
    pub const fn new(threshold: f64, score: f64) -> Self {
        Self { threshold, score }
    }
}

impl From<(f64, f64)> for Breakpoint {
    fn from((threshold, score): (f64, f64)) -> Self {
        Self { threshold, score }
    }
}

impl From<Breakpoint> for (f64, f64) {
    fn from(b: Breakpoint) -> Self {
        (b.threshold, b.score)
    }
}

/// Piecewise-linear mapping from a raw value to 0-100.
///
/// Breakpoints are kept sorted by ascending threshold regardless of direction;
/// the direction says whether scores rise or fall along that axis. A curve can
/// only be obtained through [`ScoringCurve::new`] (or deserialization, which
/// goes through it), so every curve in circulation is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveSpec", into = "CurveSpec")]
pub struct ScoringCurve {
    direction: Direction,
    breakpoints: Vec<Breakpoint>,
}

/// Unvalidated wire form of a curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSpec {
    pub direction: Direction,
    pub breakpoints: Vec<Breakpoint>,
}

impl TryFrom<CurveSpec> for ScoringCurve {
    type Error = ConfigurationError;

    fn try_from(spec: CurveSpec) -> Result<Self, Self::Error> {
        ScoringCurve::new(spec.direction, spec.breakpoints)
    }
}

impl From<ScoringCurve> for CurveSpec {
    fn from(curve: ScoringCurve) -> Self {
        CurveSpec {
            direction: curve.direction,
            breakpoints: curve.breakpoints,
        }
    }
}

impl ScoringCurve {
    /// Validate and build a curve.
    ///
    /// Requires at least two finite breakpoints, strictly increasing thresholds,
    /// scores within 0-100, and scores that never move against `direction`.
    pub fn new(
        direction: Direction,
        breakpoints: Vec<Breakpoint>,
    ) -> Result<Self, ConfigurationError> {
        if breakpoints.len() < 2 {
            return Err(ConfigurationError::TooFewBreakpoints(breakpoints.len()));
        }

        for (index, b) in breakpoints.iter().enumerate() {
            if !b.threshold.is_finite() || !b.score.is_finite() {
                return Err(ConfigurationError::NonFiniteBreakpoint { index });
            }
            if !(0.0..=100.0).contains(&b.score) {
                return Err(ConfigurationError::ScoreOutOfRange {
                    index,
                    score: b.score,
                });
            }
        }

        for (i, pair) in breakpoints.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            let index = i + 1;
            if next.threshold <= prev.threshold {
                return Err(ConfigurationError::NonMonotonicThresholds { index });
            }
            let against_direction = match direction {
                Direction::Ascending => next.score < prev.score,
                Direction::Descending => next.score > prev.score,
            };
            if against_direction {
                return Err(ConfigurationError::NonMonotonicScores {
                    direction: direction.to_string(),
                    index,
                });
            }
        }

        Ok(Self {
            direction,
            breakpoints,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Breakpoints sorted by ascending threshold (at least two)
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Calibration for one of the five metrics in the default region
    pub fn default_for(metric: Metric) -> Self {
        use Direction::*;
        match metric {
            Metric::PopulationGrowth => builtin(
                Ascending,
                &[(-2.0, 0.0), (0.0, 40.0), (1.0, 65.0), (2.0, 85.0), (3.0, 100.0)],
            ),
            Metric::RentalYield => builtin(
                Ascending,
                &[(0.0, 0.0), (1.0, 30.0), (3.0, 60.0), (5.0, 85.0), (7.0, 100.0)],
            ),
            Metric::SupplyRatio => builtin(
                Descending,
                &[(3.0, 100.0), (5.0, 85.0), (8.0, 60.0), (12.0, 30.0), (18.0, 0.0)],
            ),
            Metric::VacancyRate => builtin(
                Descending,
                &[(1.5, 100.0), (2.5, 85.0), (4.0, 60.0), (6.0, 30.0), (9.0, 0.0)],
            ),
            Metric::MortgageStress => builtin(
                Descending,
                &[(15.0, 100.0), (25.0, 85.0), (35.0, 60.0), (45.0, 30.0), (55.0, 0.0)],
            ),
        }
    }
}

// Built-in tables are checked by `test_default_curves_are_valid`.
fn builtin(direction: Direction, points: &[(f64, f64)]) -> ScoringCurve {
    ScoringCurve {
        direction,
        breakpoints: points.iter().copied().map(Breakpoint::from).collect(),
    }
}

/// One curve per metric. Replace individual curves for non-default regions.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    curves: [ScoringCurve; 5],
}

impl CurveSet {
    pub fn get(&self, metric: Metric) -> &ScoringCurve {
        &self.curves[metric as usize]
    }

    /// Swap in a regional calibration for one metric
    pub fn with_curve(mut self, metric: Metric, curve: ScoringCurve) -> Self {
        self.curves[metric as usize] = curve;
        self
    }
}

impl Default for CurveSet {
    fn default() -> Self {
        Self {
            curves: Metric::ALL.map(ScoringCurve::default_for),
        }
    }
}
