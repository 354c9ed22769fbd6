//! CSV reporter for spreadsheet export

use crate::{ComparisonTable, Metric, ScoreResult};

/// Renders comparison tables as CSV text (RFC 4180 quoting)
#[derive(Debug, Default)]
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }

    /// Header plus one row per ranked area. Failed areas are not exported.
    pub fn report_comparison(&self, table: &ComparisonTable) -> String {
        let mut out = header();
        for row in table.rows() {
            out.push_str(&format_row(
                row.rank,
                &row.area_name,
                row.sub_scores.iter().map(|(_, s)| s),
                row.composite_score,
                &row.tier.to_string(),
            ));
        }
        out
    }

    /// A single area as a one-row table
    pub fn report(&self, result: &ScoreResult) -> String {
        let mut out = header();
        out.push_str(&format_row(
            1,
            &result.area_name,
            result.sub_scores.iter().map(|(_, s)| s),
            result.composite_score,
            &result.tier.to_string(),
        ));
        out
    }
}

fn header() -> String {
    let mut columns = vec!["rank", "area"];
    columns.extend(Metric::ALL.iter().map(|m| m.key()));
    columns.extend(["composite_score", "tier"]);
    format!("{}\n", columns.join(","))
}

fn format_row(
    rank: usize,
    area: &str,
    sub_scores: impl Iterator<Item = f64>,
    composite: f64,
    tier: &str,
) -> String {
    let mut fields = vec![rank.to_string(), escape(area)];
    fields.extend(sub_scores.map(|s| format!("{:.1}", s)));
    fields.push(format!("{:.1}", composite));
    fields.push(tier.to_string());
    format!("{}\n", fields.join(","))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
