use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("climate-trends"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn options_lists_dropdown_values() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["options", "--data-dir"]).arg(fixtures());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("selected_country: Chad, India, Peru"))
        .stdout(predicate::str::contains("selected_year: 1990, 2000"))
        .stdout(predicate::str::contains(
            "selected_season: Combined, Winter, Spring, Summer, Autumn",
        ));
}

#[test]
fn outline_prints_the_hierarchy() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["outline", "--data-dir"]).arg(fixtures());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Energy\n    Solar\n    Wind"));
}

#[test]
fn render_writes_one_file_per_lane() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["render", "--data-dir"])
        .arg(fixtures())
        .args(["--country", "Chad", "--gas", "N2O", "--stats", "--out-dir"])
        .arg(out.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("temperature: 1 series (Chad)"))
        .stdout(predicate::str::contains("count="));
    for name in ["temperature", "deforestation", "heat_content", "solutions"] {
        assert!(out.path().join(format!("{name}.json")).exists(), "{name}");
    }
}

#[test]
fn render_reports_a_failed_lane_and_keeps_going() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["render", "--data-dir"])
        .arg(fixtures())
        .args(["--season", "Monsoon"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("unknown selected_season"))
        .stdout(predicate::str::contains("solutions:"));
}

#[test]
fn missing_data_dir_fails() {
    let empty = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["options", "--data-dir"]).arg(empty.path());
    cmd.assert().failure();
}

#[test]
fn render_accepts_named_control_settings() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["render", "--data-dir"])
        .arg(fixtures())
        .args(["--set", "selected_country=Peru", "--set", "selected_year=2000"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("temperature: 1 series (Peru)"));
}

#[test]
fn render_rejects_unknown_control_names() {
    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["render", "--data-dir"])
        .arg(fixtures())
        .args(["--set", "selected_colour=red"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("selected_colour"));

    let mut cmd = Command::cargo_bin("climate-trends").unwrap();
    cmd.args(["render", "--data-dir"])
        .arg(fixtures())
        .args(["--set", "selected_year"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}
