use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEXT: &str = "来月3日の午後2時に〒100-0001で会いましょう。電話は03-1234-5678です。";

fn suuji(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("suuji").unwrap();
    cmd.env("HOME", home.path()).env("XDG_CONFIG_HOME", home.path());
    cmd
}

#[test]
fn convert_prints_integer() {
    let home = TempDir::new().unwrap();

    suuji(&home)
        .args(["convert", "二千十九"])
        .assert()
        .success()
        .stdout("2019\n");

    suuji(&home)
        .args(["convert", "--style", "western", "弐〇〇〇"])
        .assert()
        .success()
        .stdout("2000\n");
}

#[test]
fn convert_rejects_invalid_numeral() {
    let home = TempDir::new().unwrap();

    suuji(&home)
        .args(["convert", "--style", "western", "十"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot convert"));
}

#[test]
fn convert_width() {
    let home = TempDir::new().unwrap();

    suuji(&home)
        .args(["convert", "--half-width", "〒１０６－２１５４"])
        .assert()
        .success()
        .stdout(predicate::str::contains("106"));
}

#[test]
fn extract_json_from_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("note.txt");
    fs::write(&input, TEXT).unwrap();

    suuji(&home)
        .args(["extract", "--reference-date", "2024-01-20"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("0312345678"))
        .stdout(predicate::str::contains("2024-02-03"));
}

#[test]
fn extract_selected_kinds_from_stdin() {
    let home = TempDir::new().unwrap();

    suuji(&home)
        .args(["extract", "--format", "csv", "--kind", "postal-code"])
        .write_stdin(TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains("postal_code,10,19,〒100-0001"))
        .stdout(predicate::str::contains("phone_number").not());
}

#[test]
fn batch_writes_reports() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), TEXT).unwrap();
    fs::write(input_dir.join("b.txt"), "令和元年五月一日").unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    suuji(&home)
        .args(["batch", &pattern, "--summary", "--output-dir"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    assert!(output_dir.join("a.json").exists());
    assert!(output_dir.join("b.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
}

#[test]
fn config_init_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("suuji.json");

    suuji(&home)
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    suuji(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "locale.prefixes.time_pm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("午後"));

    suuji(&home)
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_set_changes_extraction() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("suuji.json");

    suuji(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.phone_numbers", "false"])
        .assert()
        .success();

    suuji(&home)
        .arg("--config")
        .arg(&config)
        .args(["extract", "--format", "text"])
        .write_stdin(TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains("postal_code (1):"))
        .stdout(predicate::str::contains("phone_number").not());
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.json");
    fs::write(&config, r#"{"locale": {"suffixes": {"month": []}}}"#).unwrap();

    suuji(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suffixes.month"));
}
