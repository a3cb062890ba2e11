//! End-to-end tests for the poremetrics binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const REPORT: &str = "比表面积分析报告\n\
最高单点吸附总孔体积: 1.000 (cm^3/g)\n\
NLDFT详细数据\n\
1.0-2.0 1.0 0.01 0.1\n\
2.0-3.0 2.0 0.02 0.5\n\
3.0-4.0 3.0 0.03 0.9\n";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_poremetrics"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run poremetrics")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_analyze_text_report() {
    let dir = TempDir::new().unwrap();
    let report = write(dir.path(), "report.txt", REPORT);

    let output = run(&["analyze", &report]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Total pore volume (cm³/g): 1.000"));
    assert!(out.contains("D90/D10: 3.0000"));
}

#[test]
fn test_analyze_json_and_csv() {
    let dir = TempDir::new().unwrap();
    let report = write(dir.path(), "report.txt", REPORT);
    let csv = dir.path().join("series.csv");
    let json = dir.path().join("result.json");

    let output = run(&[
        "analyze",
        &report,
        "--json",
        "--compact",
        "-o",
        json.to_str().unwrap(),
        "--csv",
        csv.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["backend"], "line_stream");
    assert_eq!(value["metrics"]["d90_d10_ratio"], 3.0);

    let series = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = series.lines().collect();
    assert_eq!(lines[0], "average_pore_diameter_nm,pore_integral_volume_cm3_per_g_STP");
    assert_eq!(lines[1], "1.000000,0.100000");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_analyze_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let report = write(dir.path(), "empty.txt", "   \n");

    let output = run(&["analyze", &report]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_analyze_missing_file() {
    let output = run(&["analyze", "/nonexistent/report.txt"]);
    assert!(!output.status.success());
}

#[test]
fn test_batch_tally() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.txt", REPORT);
    let bad = write(dir.path(), "bad.txt", "quarterly revenue");
    let results = dir.path().join("results");

    let output = run(&["batch", &good, &bad, "-o", results.to_str().unwrap()]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Succeeded: 1"));
    assert!(out.contains("Failed: 1"));
    assert!(results.join("good.json").exists());
    assert!(results.join("bad.json").exists());
}

#[test]
fn test_info_legacy_report() {
    let dir = TempDir::new().unwrap();
    let report = write(dir.path(), "report.txt", REPORT);

    let output = run(&["info", &report]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Format: legacy"));
    assert!(out.contains("NLDFT table: Yes"));
    assert!(out.contains("Most-probable diameter: No"));
}

#[test]
fn test_version() {
    let output = run(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
