//! Console reporter with colored output

use crate::{ComparisonTable, Metric, ScoreResult, Tier};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Renders human-readable reports. Produces text only; the caller decides
/// where it goes.
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Full assessment report for one area
    pub fn render(&self, result: &ScoreResult) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{}",
            self.bold(&format!(
                "Property Investment Assessment Report - {}",
                result.area_name
            ))
        );
        let _ = writeln!(out, "{rule}");

        self.write_raw_data(&mut out, result);
        self.write_dimension_scores(&mut out, result);
        self.write_overall(&mut out, result);
        self.write_recommendation(&mut out, result);

        let _ = writeln!(out, "{rule}");
        out
    }

    /// One line per area: name, composite, tier
    pub fn render_quiet(&self, result: &ScoreResult) -> String {
        format!(
            "{}: {:.1} ({})",
            result.area_name,
            result.composite_score,
            self.colorize_tier(result.tier)
        )
    }

    /// Ranked comparison table followed by any areas that failed
    pub fn render_comparison(&self, table: &ComparisonTable) -> String {
        let mut out = String::new();
        let area_width = table
            .results
            .iter()
            .map(|r| r.area_name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut header = format!("{:>4}  {:<area_width$}", "Rank", "Area");
        for metric in Metric::ALL {
            let _ = write!(header, " {:>8}", column_title(metric));
        }
        let _ = write!(header, " {:>8}  Tier", "Score");
        let _ = writeln!(out, "{}", self.bold(&header));
        let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

        for row in table.rows() {
            let mut line = format!("{:>4}  {:<area_width$}", row.rank, row.area_name);
            for (_, score) in row.sub_scores.iter() {
                let _ = write!(line, " {:>8.1}", score);
            }
            let _ = write!(line, " {:>8.1}", row.composite_score);
            let _ = writeln!(out, "{}  {}", line, self.colorize_tier(row.tier));
        }

        if !table.failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}",
                self.paint(&format!("Failed areas ({}):", table.failures.len()), |s| {
                    s.red().bold()
                })
            );
            for failure in &table.failures {
                let _ = writeln!(out, "  - {}: {}", failure.area_name, failure.error);
            }
        }
        out
    }

    fn write_raw_data(&self, out: &mut String, result: &ScoreResult) {
        let _ = writeln!(out, "\n{}", self.bold("[Raw Data]"));
        for (metric, value) in result.raw_values.iter() {
            let _ = writeln!(
                out,
                "  [{:<6}] {:<20}: {:>6.2}%",
                metric.dimension(),
                metric.label(),
                value
            );
        }
    }

    fn write_dimension_scores(&self, out: &mut String, result: &ScoreResult) {
        let _ = writeln!(out, "\n{} (0-100 scale)", self.bold("[Dimension Scores]"));
        for (metric, score) in result.sub_scores.iter() {
            let weight = result.weights[metric];
            let score_str = format!("{:>5.1}", score);
            let colored_score = if score >= 80.0 {
                self.paint(&score_str, |s| s.green())
            } else if score >= 60.0 {
                self.paint(&score_str, |s| s.yellow())
            } else {
                self.paint(&score_str, |s| s.red())
            };
            let _ = writeln!(
                out,
                "  [{:<6}] {:<20}: {} (weight {:>4.1}%, contributes {:>4.1}) {}",
                metric.dimension(),
                metric.label(),
                colored_score,
                weight * 100.0,
                result.contribution(metric),
                create_bar(score)
            );
        }
    }

    fn write_overall(&self, out: &mut String, result: &ScoreResult) {
        let _ = writeln!(out, "\n{}", self.bold("[Overall Assessment]"));
        let _ = writeln!(
            out,
            "  Composite Score: {} / 100",
            self.bold(&format!("{:.1}", result.composite_score))
        );
        let _ = writeln!(
            out,
            "  Investment Tier: {} ({})",
            self.colorize_tier(result.tier),
            result.tier.label()
        );
    }

    fn write_recommendation(&self, out: &mut String, result: &ScoreResult) {
        let (action, rationale) = result.tier.recommendation();
        let _ = writeln!(out, "\n{}", self.bold("[Investment Recommendation]"));
        let _ = writeln!(out, "  [{}] {}", action, rationale);

        let weak = result.weak_metrics();
        if !weak.is_empty() {
            let _ = writeln!(
                out,
                "\n  {} Areas requiring attention:",
                self.paint("[ATTENTION]", |s| s.yellow().bold())
            );
            for metric in weak {
                let _ = writeln!(
                    out,
                    "     - {}: Low score ({:.1})",
                    metric.label(),
                    result.sub_scores[metric]
                );
            }
        }
    }

    fn colorize_tier(&self, tier: Tier) -> String {
        let s = tier.to_string();
        match tier {
            Tier::S => self.paint(&s, |s| s.green().bold()),
            Tier::A => self.paint(&s, |s| s.green()),
            Tier::B => self.paint(&s, |s| s.cyan()),
            Tier::C => self.paint(&s, |s| s.yellow()),
            Tier::D => self.paint(&s, |s| s.red().bold()),
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(s, |s| s.bold())
    }

    fn paint(&self, s: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(s).to_string()
        } else {
            s.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn column_title(metric: Metric) -> &'static str {
    match metric {
        Metric::PopulationGrowth => "Growth",
        Metric::RentalYield => "Yield",
        Metric::SupplyRatio => "Supply",
        Metric::VacancyRate => "Vacancy",
        Metric::MortgageStress => "Stress",
    }
}

/// One '=' per five points
fn create_bar(score: f64) -> String {
    "=".repeat((score / 5.0) as usize)
}
