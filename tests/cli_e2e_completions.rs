//! End-to-end tests for the `rhq completions` command.
//!
//! These tests verify the CLI behavior of the `completions` command by invoking
//! the binary directly and checking its output.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate shell completion scripts",
        ))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"))
        .stdout(predicate::str::contains("fish"))
        .stdout(predicate::str::contains("powershell"))
        .stdout(predicate::str::contains("elvish"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_rhq()"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("look"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef rhq"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_completions_fish() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c rhq"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_completions_powershell() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("powershell")
        .assert()
        .success()
        .stdout(predicate::str::contains("Register-ArgumentCompleter"))
        .stdout(predicate::str::contains("rhq"));
}

#[test]
fn test_completions_elvish() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("elvish")
        .assert()
        .success()
        .stdout(predicate::str::contains("edit:completion:arg-completer[rhq]"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .arg("invalid-shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completions_missing_shell_argument() {
    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.arg("completions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

/// Completions never load the configuration, so a broken file is harmless.
#[test]
fn test_completions_ignore_broken_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "roots = 42").unwrap();

    let mut cmd = cargo_bin_cmd!("rhq");
    cmd.env("RHQ_CONFIG", &config)
        .args(["completions", "bash"])
        .assert()
        .success();
}
