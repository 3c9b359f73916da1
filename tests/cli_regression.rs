// Regression tests for the marias binary: output shape, exit codes and
// miette rendering of index errors.

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn marias() -> Command {
    Command::cargo_bin("marias").unwrap()
}

#[test]
fn cli_eval_prints_both_values() {
    marias()
        .args(["eval", "+1s-h*"])
        .assert()
        .success()
        .stdout(contains("accepted").and(contains("1,20 Kč")).and(contains("-0,60 Kč")));
}

#[test]
fn cli_eval_accepts_codes_starting_with_minus() {
    marias()
        .args(["eval", "--hundred", "add", "--multiplier", "2", "--", "-k120"])
        .assert()
        .success()
        .stdout(contains("-4,80 Kč").and(contains("2,40 Kč")));
}

#[test]
fn cli_eval_json() {
    marias()
        .args(["eval", "--json", "--group-size", "4", "$:-1c"])
        .assert()
        .success()
        .stdout(contains(r#""own_value": -600"#).and(contains(r#""accepted": true"#)));
}

#[test]
fn cli_eval_rejected_play_fails() {
    marias()
        .args(["eval", "+c*"])
        .assert()
        .failure()
        .stdout(contains("rejected"))
        .stderr(contains("better suit"));
}

#[test]
fn cli_eval_group_too_small_fails() {
    marias()
        .args(["eval", "--group-size", "2", "e"])
        .assert()
        .failure()
        .stderr(contains("group size 2"));
}

#[test]
fn cli_check_reports_summary() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fleky.txt");
    fs::write(&file, common::FLEKY).unwrap();

    marias()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("U Fleků").and(contains("2 groups, 4 players, 7 plays")));
}

#[test]
fn cli_check_reports_miette_diagnostics_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.txt");
    fs::write(&file, "2024-03-14 Praha\nPepa +k105\nFranta\nJarda\n").unwrap();

    marias()
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("marias::play::score_not_multiple_of_ten").and(contains("Pepa")));
}

#[test]
fn cli_balance_walks_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("fleky.txt"), common::FLEKY).unwrap();
    fs::create_dir(dir.path().join("duben")).unwrap();
    fs::write(dir.path().join("duben").join("ruzek.txt"), common::RUZEK).unwrap();
    fs::write(dir.path().join("README.md"), "not an index").unwrap();

    marias()
        .arg("balance")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            contains("Leaderboard")
                .and(contains("19,50 Kč"))
                .and(contains("-19,20 Kč")),
        );
}

#[test]
fn cli_balance_json_with_groups() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ruzek.txt");
    fs::write(&file, common::RUZEK).unwrap();

    marias()
        .args(["balance", "--groups", "--json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(
            contains(r#""leaderboard""#)
                .and(contains(r#""indexes""#))
                .and(contains(r#""balance": 390"#)),
        );
}

#[test]
fn cli_balance_missing_file_fails() {
    marias()
        .args(["balance", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(contains("cannot read"));
}
