//! Validation of per-area metric readings

use crate::error::ValidationError;
use crate::{Metric, MetricValues};
use serde_json::Value;
use std::collections::BTreeMap;

impl MetricValues {
    /// Parse loosely-typed readings (a JSON object of metric name to number).
    ///
    /// A bad key set is reported in one error naming both the missing and the
    /// unknown keys, so a misspelt metric shows up on both sides.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut numbers = Vec::with_capacity(object.len());
        for (key, raw) in object {
            match raw.as_f64() {
                Some(n) => numbers.push((key.as_str(), n)),
                None if Metric::from_key(key).is_some() => {
                    return Err(ValidationError::NonNumeric {
                        metric: key.clone(),
                        value: raw.to_string(),
                    })
                }
                // unknown key: let from_pairs report it by name
                None => numbers.push((key.as_str(), f64::NAN)),
            }
        }

        Self::from_pairs(numbers)
    }

    /// Build readings from `(metric name, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut found: BTreeMap<Metric, f64> = BTreeMap::new();
        let mut unknown = Vec::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            match Metric::from_key(key) {
                Some(metric) => {
                    found.insert(metric, value);
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
            return Err(ValidationError::MetricKeys { missing, unknown });
        }

        let values = MetricValues::from_fn(|m| found[&m]);
        validate_finite(&values)?;
        Ok(values)
    }
}

/// Reject NaN and infinite readings
pub(crate) fn validate_finite(values: &MetricValues) -> Result<(), ValidationError> {
    values
        .iter()
        .try_for_each(|(metric, value)| check_finite(metric, value))
}

pub(crate) fn check_finite(metric: Metric, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            metric: metric.key().to_string(),
            value,
        })
    }
}
