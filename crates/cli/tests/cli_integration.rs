//! CLI integration tests for the check, params, and eval subcommands.
//!
//! Uses `assert_cmd` to spawn the `boolex` binary and verify exit codes,
//! stdout content, and stderr content.

use assert_cmd::Command;
use predicates::prelude::*;

fn boolex() -> Command {
    Command::cargo_bin("boolex").expect("boolex binary")
}

#[test]
fn help_exits_0_with_description() {
    boolex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Boolean logic expression engine and server",
        ));
}

#[test]
fn check_accepts_a_valid_expression() {
    boolex()
        .args(["check", "(x OR y) AND z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn check_rejects_an_unbalanced_expression() {
    boolex()
        .args(["check", "(x AND z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unbalanced parenthesis"));
}

#[test]
fn check_json_output_reports_the_error() {
    boolex()
        .args(["--output", "json", "check", "AND OR"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\":false"));
}

#[test]
fn params_lists_distinct_names_sorted() {
    boolex()
        .args(["params", "z AND (x OR z)"])
        .assert()
        .success()
        .stdout(predicate::str::diff("x\nz\n"));
}

#[test]
fn eval_applies_integer_truthiness() {
    boolex()
        .args(["eval", "x AND z", "--param", "x=1", "--param", "z=0"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));

    boolex()
        .args(["eval", "x AND z", "--param", "x=2", "--param", "z=7"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));
}

#[test]
fn eval_reports_a_missing_parameter() {
    boolex()
        .args(["eval", "x AND z", "--param", "x=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing parameter \"z\""));
}

#[test]
fn eval_rejects_malformed_param_flags() {
    boolex()
        .args(["eval", "x", "--param", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));

    boolex()
        .args(["eval", "x", "--param", "x=yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
}
