//! Integration tests for the converter CLI.
//!
//! These tests run the actual binary and verify output against expected CSV files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given arguments and return stdout
fn run_converter(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("phoenix-koinly").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Normalize CSV for comparison (trim trailing whitespace per line)
fn normalize_csv(csv: &str) -> Vec<String> {
    csv.lines()
        .map(|l| l.trim_end().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn test_sample_export_matches_expected_output() {
    let output = run_converter(&[&test_data_path("sample_phoenix.csv")]);
    let expected = fs::read_to_string(test_data_path("expected_koinly.csv")).unwrap();

    assert_eq!(normalize_csv(&output), normalize_csv(&expected));
}

#[test]
fn test_output_has_correct_header() {
    let output = run_converter(&[&test_data_path("sample_phoenix.csv")]);
    assert!(output.starts_with(
        "Date,Sent Amount,Sent Currency,Received Amount,Received Currency,\
         Fee Amount,Fee Currency,Net Worth Amount,Net Worth Currency,\
         Label,Description,TxHash"
    ));
}

#[test]
fn test_messy_export_skips_and_degrades_gracefully() {
    let output = run_converter(&[&test_data_path("sample_messy.csv")]);

    // Rows around the malformed timestamp both survive.
    assert!(output.contains("ln-good-0001"));
    assert!(!output.contains("ln-bad-0002"));
    assert!(output.contains("ln-good-0003"));

    // Unknown type keeps its metadata but carries no amounts.
    let unknown_row = output
        .lines()
        .find(|l| l.contains("mystery-0004"))
        .unwrap();
    assert_eq!(
        unknown_row,
        "2024-04-03 00:00:00 Z,,,,,,,,,,Unknown type,mystery-0004"
    );

    // Bad numeric amount defaults to zero but the row is kept.
    let odd_row = output.lines().find(|l| l.contains("ln-odd-0005")).unwrap();
    assert!(odd_row.contains(",0.00000000,BTC,"));
}

#[test]
fn test_messy_export_warns_on_stderr() {
    let mut cmd = Command::cargo_bin("phoenix-koinly").unwrap();
    cmd.arg(test_data_path("sample_messy.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("not-a-timestamp"))
        .stderr(predicate::str::contains("oops"));
}

#[test]
fn test_rounding_adjustment_flag_appends_cost_entry() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "header").unwrap();
    for i in 0..3 {
        // 1000.4 sats each: 0.4 sats of residual per row, 1.2 in total.
        writeln!(
            input,
            "2024-05-01T10:0{}:00.000Z,0,lightning_received,\"1,000,400\",0,0,0,0,0,0,0,tx{},,",
            i, i
        )
        .unwrap();
    }
    input.flush().unwrap();
    let path = input.path().to_str().unwrap().to_string();

    let without_flag = run_converter(&[&path]);
    assert!(!without_flag.contains("Adjustment for rounding differences"));
    assert_eq!(without_flag.lines().count(), 4);

    let with_flag = run_converter(&["--rounding-adjustment", &path]);
    let last = with_flag.lines().last().unwrap();
    assert!(last.contains("Adjustment for rounding differences"));
    assert!(last.contains(",0.00000001,BTC,"));
    assert!(last.contains(",cost,"));
    assert_eq!(with_flag.lines().count(), 5);
}

#[test]
fn test_rounding_adjustment_flag_is_noop_for_whole_satoshis() {
    let output = run_converter(&["-r", &test_data_path("sample_phoenix.csv")]);
    let expected = fs::read_to_string(test_data_path("expected_koinly.csv")).unwrap();

    // All sample amounts are whole satoshis, so no correction entry appears.
    assert_eq!(normalize_csv(&output), normalize_csv(&expected));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("phoenix-koinly").unwrap();
    cmd.arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("phoenix-koinly").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_empty_file_is_fatal() {
    let input = tempfile::NamedTempFile::new().unwrap();
    let mut cmd = Command::cargo_bin("phoenix-koinly").unwrap();
    cmd.arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing the header row"));
}

#[test]
fn test_amounts_have_eight_decimal_places() {
    let output = run_converter(&[&test_data_path("sample_phoenix.csv")]);

    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        // Sent, received and fee amounts at columns 1, 3, 5.
        for part in [parts[1], parts[3], parts[5]] {
            if !part.is_empty() {
                let dot_pos = part.find('.').expect("amount has a decimal point");
                assert_eq!(
                    part.len() - dot_pos - 1,
                    8,
                    "Expected 8 decimal places in: {}",
                    part
                );
            }
        }
    }
}
