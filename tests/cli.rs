//! CLI behavior tests: exit codes, output formats, config, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SINGLE: &str = "test-data/single.json";
const AREAS: &str = "test-data/areas.json";
const PARTIAL: &str = "test-data/partial.json";

const EXAMPLE_CITY: &str = r#"{
  "population_growth": 2.5,
  "rental_yield": 5.5,
  "supply_ratio": 6.0,
  "vacancy_rate": 2.0,
  "mortgage_stress": 28.0
}"#;

fn propscore_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_propscore"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_args_returns_error_not_panic() {
    propscore_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn score_console_report() {
    propscore_cmd()
        .args(["score", SINGLE, "--area", "Example City", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Property Investment Assessment Report - Example City",
        ))
        .stdout(predicate::str::contains("Composite Score: 86.1 / 100"))
        .stdout(predicate::str::contains("Investment Tier: S (Excellent)"))
        .stdout(predicate::str::contains("[STRONG BUY]"));
}

#[test]
fn score_json_output_valid() {
    let output = propscore_cmd()
        .args(["score", SINGLE, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let v: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(v["areaName"], "single");
    assert_eq!(v["compositeScore"], 86.1);
    assert_eq!(v["tier"], "S");
    assert_eq!(v["subScores"]["rental_yield"], 88.8);
}

#[test]
fn score_quiet_line() {
    propscore_cmd()
        .args(["score", SINGLE, "--area", "Example City", "-q", "--no-color"])
        .assert()
        .success()
        .stdout("Example City: 86.1 (S)\n");
}

#[test]
fn score_csv_output() {
    propscore_cmd()
        .args(["score", SINGLE, "--csv", "--area", "Example City"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank,area,population_growth"))
        .stdout(predicate::str::contains(
            "1,Example City,92.5,88.8,76.7,92.5,77.5,86.1,S",
        ));
}

#[test]
fn below_threshold_exit_1() {
    propscore_cmd()
        .args(["score", SINGLE, "--threshold", "90", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold 90"));
}

#[test]
fn above_threshold_exit_0() {
    propscore_cmd()
        .args(["score", SINGLE, "--threshold", "80"])
        .assert()
        .success();
}

#[test]
fn file_not_found_exit_2() {
    propscore_cmd()
        .args(["score", "test-data/does-not-exist.json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invalid_json_exit_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ population_growth: 2.5 ").unwrap();
    propscore_cmd()
        .arg("score")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn missing_metric_exit_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thin.json");
    fs::write(&path, r#"{"population_growth": 2.5, "rental_yield": 5.5}"#).unwrap();
    propscore_cmd()
        .arg("score")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "missing metric(s): supply_ratio, vacancy_rate, mortgage_stress",
        ));
}

#[test]
fn compare_console_table() {
    let output = propscore_cmd()
        .args(["compare", AREAS, "--no-color"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = s.lines().collect();
    assert!(lines[0].contains("Rank"));
    assert!(lines[2].contains("Example City"));
    assert!(lines[3].contains("Harbourside"));
    assert!(lines[4].contains("Dry Creek"));
}

#[test]
fn compare_detail_top_prints_full_report_for_leader() {
    let output = propscore_cmd()
        .args(["compare", AREAS, "--detail-top", "--no-color"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    assert!(s.lines().next().unwrap().contains("Rank"));
    assert!(s.contains("Property Investment Assessment Report - Example City"));
    assert!(!s.contains("Property Investment Assessment Report - Harbourside"));
}

#[test]
fn compare_without_detail_top_has_no_full_report() {
    propscore_cmd()
        .args(["compare", AREAS, "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Property Investment Assessment Report").not());
}

#[test]
fn compare_csv_output() {
    let output = propscore_cmd()
        .args(["compare", AREAS, "--csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        concat!(
            "rank,area,population_growth,rental_yield,supply_ratio,",
            "vacancy_rate,mortgage_stress,composite_score,tier"
        )
    );
    assert!(lines[2].starts_with("2,Harbourside,"));
    assert!(lines[2].ends_with(",68.6,B"));
}

#[test]
fn compare_json_parallel() {
    let output = propscore_cmd()
        .args(["compare", AREAS, "--json", "--parallel"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let v: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(v["summary"]["areasScored"], 3);
    assert_eq!(v["summary"]["areasFailed"], 0);
    assert_eq!(v["summary"]["topArea"], "Example City");
    assert_eq!(v["ranking"][2]["areaName"], "Dry Creek");
}

#[test]
fn compare_with_failed_area_exit_1() {
    propscore_cmd()
        .args(["compare", PARTIAL, "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Example City"))
        .stdout(predicate::str::contains("Failed areas (1):"))
        .stdout(predicate::str::contains("Unfinished Estate"));
}

#[test]
fn compare_threshold_names_areas_below() {
    propscore_cmd()
        .args(["compare", AREAS, "--threshold", "60", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Dry Creek"))
        .stderr(predicate::str::contains("Harbourside").not());
}

#[test]
fn compare_strategy_flag_sets_weights() {
    let output = propscore_cmd()
        .args(["compare", AREAS, "--json", "--strategy", "conservative"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["results"][0]["weights"]["rental_yield"], 0.35);
}

#[test]
fn compare_rejects_non_object_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    propscore_cmd()
        .arg("compare")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("must hold an object"));
}

#[test]
fn compare_empty_file_exit_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("none.json");
    fs::write(&path, "{}").unwrap();
    propscore_cmd()
        .arg("compare")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No areas found"));
}

#[test]
fn config_next_to_input_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("city.json"), EXAMPLE_CITY).unwrap();
    fs::write(
        dir.path().join(".propscorerc.json"),
        r#"{"strategy": "aggressive", "threshold": 95}"#,
    )
    .unwrap();

    let output = propscore_cmd()
        .arg("score")
        .arg(dir.path().join("city.json"))
        .arg("--json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["weights"]["population_growth"], 0.4);
}

#[test]
fn cli_threshold_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("city.json"), EXAMPLE_CITY).unwrap();
    fs::write(dir.path().join(".propscorerc.json"), r#"{"threshold": 95}"#).unwrap();

    propscore_cmd()
        .arg("score")
        .arg(dir.path().join("city.json"))
        .args(["--threshold", "50", "-q"])
        .assert()
        .success();
}

#[test]
fn invalid_config_weights_exit_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("city.json"), EXAMPLE_CITY).unwrap();
    let config = dir.path().join("weights.json");
    fs::write(
        &config,
        r#"{"weights": {
            "population_growth": 0.5, "rental_yield": 0.5, "supply_ratio": 0.5,
            "vacancy_rate": 0.0, "mortgage_stress": 0.0
        }}"#,
    )
    .unwrap();

    propscore_cmd()
        .arg("score")
        .arg(dir.path().join("city.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("weights must sum to 1.0"));
}

#[test]
fn invalid_regional_curve_exit_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("city.json"), EXAMPLE_CITY).unwrap();
    fs::write(
        dir.path().join(".propscorerc.json"),
        r#"{"curves": {"vacancy_rate": {
            "direction": "descending", "breakpoints": [[2, 50], [1, 100]]}}}"#,
    )
    .unwrap();

    propscore_cmd()
        .arg("score")
        .arg(dir.path().join("city.json"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("strictly increasing"));
}

#[test]
fn verbose_emits_debug_logs() {
    propscore_cmd()
        .args(["score", SINGLE, "-q", "--verbose", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("scored area"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    propscore_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .args(["--strategy", "conservative", "--threshold", "65"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(dir.path().join(".propscorerc.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v["strategy"], "conservative");
    assert_eq!(v["threshold"], 65.0);
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".propscorerc.json");
    fs::write(&path, r#"{"threshold": 42}"#).unwrap();

    propscore_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"threshold": 42}"#);
}
