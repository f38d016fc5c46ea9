//! CLI smoke tests
//!
//! These exercise argument parsing and early validation through the real
//! binary; no network calls are made.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("noter").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn test_generate_without_api_key_fails_fast() {
    let mut cmd = Command::cargo_bin("noter").unwrap();
    cmd.env_remove("GROQ_API_KEY")
        .arg("generate")
        .arg("Rust")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_generate_requires_subject_argument() {
    let mut cmd = Command::cargo_bin("noter").unwrap();
    cmd.arg("generate").assert().failure();
}
