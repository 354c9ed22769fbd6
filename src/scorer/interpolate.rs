//! Direction-aware piecewise-linear interpolation

use super::curve::{Breakpoint, ScoringCurve};
use crate::Direction;

/// Map a raw value onto 0-100 using `curve`.
///
/// A value exactly on a threshold gets that breakpoint's score. Past the worse
/// end the outermost band is extrapolated and clamped; past the better end the
/// best breakpoint's score holds. Returns full precision; rounding is left to
/// the caller. Non-finite input yields NaN; callers validate readings first
/// (see `ScoringEngine::score_metric`).
pub(crate) fn score_value(value: f64, curve: &ScoringCurve) -> f64 {
    if !value.is_finite() {
        return f64::NAN;
    }
    let points = curve.breakpoints();
    let n = points.len();
    let (first, last) = (points[0], points[n - 1]);

    if value <= first.threshold {
        if value == first.threshold {
            return first.score;
        }
        return match curve.direction() {
            Direction::Ascending => lerp(first, points[1], value),
            Direction::Descending => first.score,
        }
        .clamp(0.0, 100.0);
    }

    if value >= last.threshold {
        if value == last.threshold {
            return last.score;
        }
        return match curve.direction() {
            Direction::Ascending => last.score,
            Direction::Descending => lerp(points[n - 2], last, value),
        }
        .clamp(0.0, 100.0);
    }

    for pair in points.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if value == lo.threshold {
            return lo.score;
        }
        if value < hi.threshold {
            return lerp(lo, hi, value).clamp(0.0, 100.0);
        }
    }

    // unreachable for finite values: the bounds checks above cover both ends
    last.score
}

fn lerp(lo: Breakpoint, hi: Breakpoint, value: f64) -> f64 {
    let t = (value - lo.threshold) / (hi.threshold - lo.threshold);
    lo.score + t * (hi.score - lo.score)
}
