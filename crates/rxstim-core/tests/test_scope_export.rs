//! Tests for Scope CSV export
//!
//! - CSV format with time column and channel data
//! - Custom channel labels
//! - Proper header formatting

use rxstim_core::prelude::*;
use std::fs;

#[test]
fn test_save_single_channel() {
    let mut scope = Scope::<1>::new();
    let dt = 0.01;

    for i in 0..10 {
        let t = i as f64 * dt;
        scope.set_input(0, t);
        scope.update(t);
    }

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("single_channel.csv");
    scope.save(&path).expect("failed to save CSV");

    let contents = fs::read_to_string(&path).expect("failed to read CSV");
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "time [s],port 0");
    assert!(lines[1].starts_with("0,0"));
    // 1 header + 10 data rows
    assert_eq!(lines.len(), 11);
}

#[test]
fn test_save_with_custom_labels() {
    let mut scope = Scope::<2>::new();
    scope.set_input(0, 0.5);
    scope.set_input(1, 42.0);
    scope.update(0.0);

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("labeled.csv");
    scope
        .save_with_labels(&path, &["analog", "code"])
        .expect("failed to save CSV");

    let contents = fs::read_to_string(&path).expect("failed to read CSV");
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "time [s],analog,code");
    assert_eq!(lines[1], "0,0.5,42");
}

#[test]
fn test_save_empty_scope_writes_header_only() {
    let scope = Scope::<1>::new();

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("empty.csv");
    scope.save(&path).expect("failed to save CSV");

    let contents = fs::read_to_string(&path).expect("failed to read CSV");
    assert_eq!(contents.lines().count(), 1);
}

#[test]
#[should_panic(expected = "expected 2 labels")]
fn test_save_label_count_mismatch_panics() {
    let scope = Scope::<2>::new();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let _ = scope.save_with_labels(dir.path().join("bad.csv"), &["only-one"]);
}
