use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../liftlog-parser/tests/data")
        .join(name)
}

fn liftlog(args: &[&str]) -> Result<Output> {
    // Run from an empty directory so a developer's .env cannot leak in.
    let workdir = tempfile::tempdir()?;
    Command::new(env!("CARGO_BIN_EXE_liftlog"))
        .args(args)
        .current_dir(workdir.path())
        .env_remove("LIFTLOG_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .context("failed to run liftlog")
}

fn json_stdout(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}

#[test]
fn dashboard_json_charts_the_default_exercise() -> Result<()> {
    let export = fixture("hevy_export.csv");
    let output = liftlog(&[
        "dashboard",
        export.to_str().context("fixture path is not UTF-8")?,
        "--window",
        "all-time",
        "--format",
        "json",
    ])?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let document = json_stdout(&output)?;
    assert_eq!(document["state"], "loaded");

    let dashboard = &document["dashboard"];
    assert_eq!(dashboard["window"], "All Time");
    assert_eq!(dashboard["selected_exercise"], "Bench Press (Barbell)");
    assert_eq!(
        dashboard["exercise_options"],
        serde_json::json!(["Bench Press (Barbell)", "Treadmill", "Squat (Barbell)"])
    );

    let line = &dashboard["panels"][0];
    assert_eq!(line["kind"], "line");
    assert_eq!(line["points"][0]["label"], "2024-01-02");
    let one_rep_max = line["points"][0]["value"].as_f64().context("1RM value")?;
    assert!((one_rep_max - 116.666_666_7).abs() < 1e-6);

    let bar = &dashboard["panels"][1];
    assert_eq!(bar["kind"], "bar");
    assert_eq!(bar["points"][0]["value"].as_f64(), Some(1415.0));

    assert_eq!(dashboard["panels"][2]["kind"], "fallback");
    assert_eq!(
        dashboard["recent_sets"]["rows"]
            .as_array()
            .map(|rows| rows.len()),
        Some(3)
    );
    Ok(())
}

#[test]
fn dashboard_json_reports_load_errors_and_exits_nonzero() -> Result<()> {
    let export = fixture("missing_weight.csv");
    let output = liftlog(&[
        "dashboard",
        export.to_str().context("fixture path is not UTF-8")?,
        "--format",
        "json",
    ])?;
    assert!(!output.status.success());

    let document = json_stdout(&output)?;
    assert_eq!(document["state"], "error");
    let message = document["message"].as_str().context("error message")?;
    assert!(message.contains("weight_kg"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hint:"));
    Ok(())
}

#[test]
fn exercises_marks_the_selected_option() -> Result<()> {
    let export = fixture("hevy_export.csv");
    let output = liftlog(&[
        "exercises",
        export.to_str().context("fixture path is not UTF-8")?,
        "--window",
        "all-time",
    ])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        ["* Bench Press (Barbell)", "  Treadmill", "  Squat (Barbell)"]
    );
    Ok(())
}
