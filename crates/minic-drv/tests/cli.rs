use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn prints_pretty_json_bundle_for_a_valid_program() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "int x = 5; print(x);").unwrap();

    Command::cargo_bin("minic")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output\": \"5\""));
}

#[test]
fn persist_flag_surfaces_in_the_bundle() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "print(1);").unwrap();

    Command::cargo_bin("minic")
        .unwrap()
        .arg(file.path())
        .arg("--persist")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"persist\": true"));
}

#[test]
fn missing_file_is_reported_as_an_error_exit() {
    Command::cargo_bin("minic")
        .unwrap()
        .arg("/no/such/file.mc")
        .assert()
        .failure();
}
