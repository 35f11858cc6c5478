//! CLI help strings succeed.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn hostpatch_help() {
    Command::cargo_bin("hostpatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("restore"));
}

#[test]
fn hostpatch_download_help() {
    Command::cargo_bin("hostpatch")
        .unwrap()
        .args(["download", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--target"));
}

#[test]
fn hostpatch_apply_help() {
    Command::cargo_bin("hostpatch")
        .unwrap()
        .args(["apply", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rules"));
}

#[test]
fn hostpatch_restore_help() {
    Command::cargo_bin("hostpatch")
        .unwrap()
        .args(["restore", "--help"])
        .assert()
        .success();
}

#[test]
fn unknown_target_is_rejected() {
    Command::cargo_bin("hostpatch")
        .unwrap()
        .args(["download", "--target", "gitlab"])
        .assert()
        .failure();
}
