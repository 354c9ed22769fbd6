//! Metric scorer - maps one raw indicator onto a 0-100 scale

pub mod curve;
mod interpolate;

pub use curve::{Breakpoint, CurveSet, CurveSpec, ScoringCurve};
pub(crate) use interpolate::score_value;
