//! JSON reporter for machine-readable output

use crate::{AreaFailure, ComparisonRow, ComparisonTable, ScoreResult};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single score result as JSON
    pub fn report(&self, result: &ScoreResult) -> String {
        self.to_json(result, "{}")
    }

    /// Report a comparison: ranked rows, full results and failures
    pub fn report_comparison(&self, table: &ComparisonTable) -> String {
        let output = JsonComparison {
            ranking: table.rows(),
            results: &table.results,
            failures: &table.failures,
            summary: JsonSummary {
                areas_scored: table.results.len(),
                areas_failed: table.failures.len(),
                top_area: table.top().map(|r| r.area_name.as_str()),
            },
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonComparison<'a> {
    ranking: Vec<ComparisonRow>,
    results: &'a [ScoreResult],
    failures: &'a [AreaFailure],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    areas_scored: usize,
    areas_failed: usize,
    top_area: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, Error};
    use crate::{MetricValues, Tier};

    fn make_result(area: &str, composite: f64) -> ScoreResult {
        ScoreResult {
            area_name: area.to_string(),
            raw_values: MetricValues::new([2.5, 5.5, 6.0, 2.0, 28.0]),
            sub_scores: MetricValues::new([92.5, 88.8, 76.7, 92.5, 77.5]),
            weights: MetricValues::new([0.25, 0.25, 0.20, 0.15, 0.15]),
            contributions: MetricValues::new([23.125, 22.2, 15.34, 13.875, 11.625]),
            composite_score: composite,
            tier: Tier::from_score(composite),
        }
    }

    #[test]
    fn test_json_single_result_has_expected_keys() {
        let reporter = JsonReporter::new();
        let json = reporter.report(&make_result("Example City", 86.1));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["areaName"], "Example City");
        assert_eq!(parsed["compositeScore"], 86.1);
        assert_eq!(parsed["tier"], "S");
        assert_eq!(parsed["subScores"]["rental_yield"], 88.8);
        assert_eq!(parsed["weights"]["supply_ratio"], 0.2);
        assert_eq!(parsed["rawValues"]["mortgage_stress"], 28.0);
    }

    #[test]
    fn test_json_result_round_trips() {
        let result = make_result("Example City", 86.1);
        let json = JsonReporter::new().report(&result);
        let parsed: ScoreResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_json_pretty_output() {
        let reporter = JsonReporter::new().pretty();
        let json = reporter.report(&make_result("A", 70.0));
        assert!(json.contains('\n'), "pretty JSON should have newlines");
        assert!(json.contains("  "), "pretty JSON should have indentation");
    }

    #[test]
    fn test_json_comparison() {
        let table = ComparisonTable {
            results: vec![make_result("Sydney", 86.1), make_result("Perth", 72.0)],
            failures: vec![AreaFailure {
                area_name: "Darwin".to_string(),
                error: Error::Configuration(ConfigurationError::TooFewBreakpoints(1)),
            }],
        };
        let json = JsonReporter::new().report_comparison(&table);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let ranking = parsed["ranking"].as_array().unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0]["rank"], 1);
        assert_eq!(ranking[0]["areaName"], "Sydney");
        assert_eq!(ranking[1]["tier"], "B");

        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["failures"][0]["areaName"], "Darwin");
        assert!(parsed["failures"][0]["error"]
            .as_str()
            .unwrap()
            .contains("at least 2 breakpoints"));

        assert_eq!(parsed["summary"]["areasScored"], 2);
        assert_eq!(parsed["summary"]["areasFailed"], 1);
        assert_eq!(parsed["summary"]["topArea"], "Sydney");
    }

    #[test]
    fn test_json_empty_comparison() {
        let json = JsonReporter::new().report_comparison(&ComparisonTable::default());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["ranking"].as_array().unwrap().is_empty());
        assert!(parsed["summary"]["topArea"].is_null());
    }
}
