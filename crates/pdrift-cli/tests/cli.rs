//! End-to-end tests for the pdrift binary, driven by snapshot JSON inputs.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const REFERENCE: &str = r#"{
  "text": [
    {"page": 1, "text": "first page"},
    {"page": 2, "text": "second page"}
  ],
  "barcodes": [
    {"page": 1, "data": "4006381333931", "type": "EAN_13"}
  ]
}"#;

const FIRST_PAGE_ONLY: &str = r#"{
  "text": [
    {"page": 1, "text": "first page"}
  ],
  "barcodes": [
    {"page": 1, "data": "4006381333931", "type": "EAN_13"}
  ]
}"#;

fn write_snapshot(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

fn pdrift() -> Command {
    Command::cargo_bin("pdrift").unwrap()
}

#[test]
fn compare_identical_snapshots_passes() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_snapshot(dir.path(), "reference.json", REFERENCE);
    let test = write_snapshot(dir.path(), "test.json", REFERENCE);

    pdrift()
        .arg("compare")
        .arg(&reference)
        .arg(&test)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"PASS\""));
}

#[test]
fn compare_reports_missing_page_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_snapshot(dir.path(), "reference.json", REFERENCE);
    let test = write_snapshot(dir.path(), "test.json", FIRST_PAGE_ONLY);

    pdrift()
        .arg("compare")
        .arg(&reference)
        .arg(&test)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"status\": \"FAIL\""));
}

#[test]
fn extra_content_in_test_document_still_passes() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_snapshot(dir.path(), "reference.json", FIRST_PAGE_ONLY);
    let test = write_snapshot(dir.path(), "test.json", REFERENCE);

    pdrift()
        .arg("compare")
        .arg(&reference)
        .arg(&test)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"additional_text_pages\""));
}

#[test]
fn compare_text_format_lists_missing_pages() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_snapshot(dir.path(), "reference.json", REFERENCE);
    let test = write_snapshot(dir.path(), "test.json", FIRST_PAGE_ONLY);

    pdrift()
        .arg("compare")
        .arg(&reference)
        .arg(&test)
        .args(["--format", "text"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Status: FAIL"))
        .stdout(predicate::str::contains("Missing text pages: 2"));
}

#[test]
fn compare_writes_result_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_snapshot(dir.path(), "reference.json", REFERENCE);
    let test = write_snapshot(dir.path(), "test.json", REFERENCE);
    let output = dir.path().join("diff.json");

    pdrift()
        .arg("compare")
        .arg(&reference)
        .arg(&test)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"status\": \"PASS\""));
}

#[test]
fn extract_rejects_missing_input() {
    pdrift()
        .arg("extract")
        .arg("no-such-file.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn compare_rejects_missing_reference() {
    let dir = tempfile::tempdir().unwrap();
    let test = write_snapshot(dir.path(), "test.json", REFERENCE);

    pdrift()
        .arg("compare")
        .arg("no-such-reference.json")
        .arg(&test)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
