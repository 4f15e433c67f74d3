//! End-to-end tests running the airlogit binary

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn airlogit() -> Command {
    Command::cargo_bin("airlogit").unwrap()
}

#[test]
fn test_run_prints_four_metric_lines() {
    let (_dir, path) = create_survey_csv(120);

    let output = airlogit()
        .arg("--input")
        .arg(&path)
        .arg("--no-plots")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    for prefix in ["Accuracy: ", "Precision: ", "Recall: ", "F1 Score: "] {
        let line = stdout
            .lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("missing '{}' line in:\n{}", prefix, stdout));
        let value = line.trim_start_matches(prefix);
        assert_eq!(value.split('.').nth(1).map(str::len), Some(6), "{}", line);
        let parsed: f64 = value.parse().unwrap();
        assert!((0.0..=1.0).contains(&parsed));
    }
}

#[test]
fn test_run_is_reproducible() {
    let (_dir, path) = create_survey_csv(120);

    let run = || {
        let output = airlogit()
            .arg("--input")
            .arg(&path)
            .arg("--no-plots")
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|l| l.starts_with("Accuracy: ") || l.starts_with("F1 Score: "))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_run_renders_plots() {
    let (_dir, path) = create_survey_csv(60);

    airlogit()
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("fitted logistic curve"))
        .stdout(predicate::str::contains("Confusion Matrix"));
}

#[test]
fn test_run_exports_json() {
    let (dir, path) = create_survey_csv(60);
    let export_path = dir.path().join("run.json");

    airlogit()
        .arg("--input")
        .arg(&path)
        .arg("--no-plots")
        .arg("--export")
        .arg(&export_path)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(value["data"]["rows_loaded"], 60);
    assert_eq!(value["data"]["rows_dropped"], 7);
    assert_eq!(value["metadata"]["seed"], 42);
    let counts = &value["confusion_matrix"]["counts"];
    let total: u64 = (0..2)
        .flat_map(|i| (0..2).map(move |j| (i, j)))
        .map(|(i, j)| counts[i][j].as_u64().unwrap())
        .sum();
    assert_eq!(total, value["data"]["test_rows"].as_u64().unwrap());
}

#[test]
fn test_missing_file_fails_in_loader() {
    airlogit()
        .arg("--input")
        .arg("/nonexistent/Invistico_Airline.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loader stage failed"));
}

#[test]
fn test_missing_target_column_fails_in_loader() {
    let (_dir, path) = write_temp_csv("Inflight entertainment,Age\n4,30\n1,40\n");

    airlogit()
        .arg("--input")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loader stage failed"))
        .stderr(predicate::str::contains("satisfaction"));
}

#[test]
fn test_non_numeric_feature_fails_in_cleaner() {
    let csv = "satisfaction,Inflight entertainment\nsatisfied,5\ndissatisfied,poor\nsatisfied,4\ndissatisfied,1\n";
    let (_dir, path) = write_temp_csv(csv);

    airlogit()
        .arg("--input")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cleaner stage failed"));
}
