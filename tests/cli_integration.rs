//! Runs the binary against presets and the sample site files.

use std::path::PathBuf;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_renewables-planner"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("renewables-planner process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

/// Fresh path under the system temp dir for this test process.
fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("renewables-planner-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn grand_total(stdout: &str) -> f64 {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Grand total:"))
        .and_then(|v| v.trim().parse().ok())
        .expect("report should end with a grand total")
}

#[test]
fn default_run_is_an_empty_apartment_block() {
    let stdout = stdout_of(&[]);
    assert!(stdout.contains("--- Cost vs Benefit ---"));
    assert!(!stdout.contains("Vertical Farming"));
    assert_eq!(grand_total(&stdout), 0.0);
}

#[test]
fn presets_and_sites_produce_distinct_totals() {
    let office_mixed = grand_total(&stdout_of(&["--preset", "office_mixed"]));
    let rooftop = grand_total(&stdout_of(&["--site", "sites/apartments_rooftop.toml"]));
    let custom = grand_total(&stdout_of(&["--site", "sites/office_custom.toml"]));

    assert_eq!(rooftop, 870_000.0);
    assert_eq!(custom, 1_372_000.0);
    assert!(office_mixed > 0.0);
    assert!(office_mixed != rooftop && office_mixed != custom);
}

#[test]
fn custom_prices_change_payback() {
    let stdout = stdout_of(&["--site", "sites/office_custom.toml"]);
    let wind = stdout
        .lines()
        .find(|l| l.starts_with("Small Wind Turbines"))
        .expect("wind row");
    assert!(wind.ends_with("1140.00 years"), "got {wind}");
}

#[test]
fn unknown_preset_exits_with_error() {
    let output = run(&["--preset", "castle"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn site_and_preset_are_mutually_exclusive() {
    let output = run(&["--site", "sites/office_custom.toml", "--preset", "office"]);
    assert!(!output.status.success());
}

#[test]
fn export_and_save_write_files() {
    let csv_path = temp_path("results.csv");
    let jsonl_path = temp_path("records.jsonl");
    let csv_arg = csv_path.to_string_lossy().into_owned();
    let jsonl_arg = jsonl_path.to_string_lossy().into_owned();

    stdout_of(&[
        "--preset",
        "office_mixed",
        "--export-csv",
        &csv_arg,
        "--save",
        &jsonl_arg,
        "--user-id",
        "7",
    ]);

    let csv = std::fs::read_to_string(&csv_path).expect("csv written");
    assert_eq!(csv.lines().count(), 10);
    assert!(csv.starts_with("source,count,"));

    let jsonl = std::fs::read_to_string(&jsonl_path).expect("records written");
    let records: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    assert_eq!(records[0]["record"], "cost_analysis");
    assert_eq!(records[1]["record"], "carbon_analysis");
    assert!(records[2..].iter().all(|r| r["record"] == "energy_usage"));
    assert!(records.iter().all(|r| r["user_id"] == "7"));

    let _ = std::fs::remove_file(csv_path);
    let _ = std::fs::remove_file(jsonl_path);
}

#[test]
fn save_requires_user_id() {
    let path = temp_path("orphan.jsonl");
    let output = run(&["--save", &path.to_string_lossy()]);
    assert!(!output.status.success());
    assert!(!path.exists());
}
