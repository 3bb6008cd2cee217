//! Integration tests for the verbline binary
//!
//! These tests execute the compiled binary against the fixture catalog using
//! `assert_cmd`. Each test runs inside its own temp directory so that config
//! discovery never reaches a real `.verbline/config.toml`.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/verbs.toml")
}

/// Command running in an isolated directory with the fixture catalog.
fn verbline(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verbline"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--catalog")
        .arg(fixture_catalog());
    cmd
}

fn isolated() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    temp
}

#[test]
fn verbs_lists_catalog() {
    let temp = isolated();
    verbline(temp.path())
        .arg("verbs")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("Record changes to the repository"));
}

#[test]
fn verbs_json() {
    let temp = isolated();
    let output = verbline(temp.path()).args(["verbs", "--json"]).output().unwrap();
    assert!(output.status.success());

    let verbs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = verbs
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["build", "run", "add", "commit", "push"]);
}

#[test]
fn describe_shows_fields() {
    let temp = isolated();
    verbline(temp.path())
        .args(["describe", "run", "--order", "required-first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("required"))
        .stdout(predicate::str::contains("<command> #0"));
}

#[test]
fn build_prints_command_string() {
    let temp = isolated();
    verbline(temp.path())
        .args([
            "build",
            "build",
            "--set",
            "tag=a:latest,a:v1",
            "--set",
            "no-cache",
            "--set",
            "context=.",
        ])
        .assert()
        .success()
        .stdout("build --tag a:latest,a:v1 --no-cache\n");
}

#[test]
fn build_with_defaults_and_executable() {
    let temp = isolated();
    verbline(temp.path())
        .args([
            "build",
            "build",
            "--set",
            "tag=web",
            "--apply-defaults",
            "--include-defaults",
            "--exe",
            "docker",
        ])
        .assert()
        .success()
        .stdout("docker build --tag web --pull missing --progress auto --context .\n");
}

#[test]
fn build_json_tokens() {
    let temp = isolated();
    verbline(temp.path())
        .args(["build", "run", "--set", "image=nginx 1.2", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["run","--image","\"nginx 1.2\""]"#));
}

#[test]
fn build_unknown_verb_exits_4() {
    let temp = isolated();
    verbline(temp.path())
        .args(["build", "deploy"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No verb named 'deploy'"));
}

#[test]
fn build_unknown_field_exits_2() {
    let temp = isolated();
    verbline(temp.path())
        .args(["build", "commit", "--set", "msg=hi"])
        .assert()
        .code(2);
}

#[test]
fn prefill_json() {
    let temp = isolated();
    let output = verbline(temp.path())
        .args(["prefill", "commit --message \"fix it\" --amend", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let instance: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(instance["verb"], "commit");
    assert_eq!(instance["values"]["message"], "fix it");
    assert_eq!(instance["values"]["amend"], true);
}

#[test]
fn prefill_unbalanced_quotes_fails() {
    let temp = isolated();
    verbline(temp.path())
        .args(["prefill", "commit --message \"oops"])
        .assert()
        .code(2);
}

#[test]
fn validate_clean_catalog() {
    let temp = isolated();
    verbline(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All validations passed"));
}

#[test]
fn validate_reports_duplicates() {
    let temp = isolated();
    let catalog = temp.path().join("bad.toml");
    std::fs::write(
        &catalog,
        r#"
[[verb]]
name = "run"
[[verb.field]]
id = "logFile"
kind = "string"
[[verb.field]]
id = "output"
kind = "string"
long = "log-file"
"#,
    )
    .unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("verbline"))
        .current_dir(temp.path())
        .args(["--catalog", "bad.toml", "validate"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Duplicate long name '--log-file'"));
}

#[test]
fn missing_catalog_exits_2() {
    let temp = isolated();
    Command::new(assert_cmd::cargo::cargo_bin!("verbline"))
        .current_dir(temp.path())
        .arg("verbs")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No verb catalog"));
}

#[test]
fn config_file_supplies_catalog_and_executable() {
    let temp = isolated();
    let config_dir = temp.path().join(".verbline");
    std::fs::create_dir(&config_dir).unwrap();
    std::fs::copy(fixture_catalog(), config_dir.join("verbs.toml")).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[defaults]\nexecutable = \"git\"\n\n[catalog]\npath = \"verbs.toml\"\n",
    )
    .unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("verbline"))
        .current_dir(temp.path())
        .args(["build", "commit", "--set", "message=wip"])
        .assert()
        .success()
        .stdout("git commit --message wip\n");

    Command::new(assert_cmd::cargo::cargo_bin!("verbline"))
        .current_dir(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("executable = git (config)"));
}
