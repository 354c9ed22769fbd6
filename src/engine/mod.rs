//! Composite engine - validation, aggregation, tiering and batch comparison

pub mod composite;
pub mod readings;
pub mod weights;

pub use composite::{aggregate, round1, ScoringEngine};
pub use weights::{Strategy, WeightConfig, WEIGHT_TOLERANCE};
