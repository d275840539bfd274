//! Conformance tests that run YAML fixtures against kindred
//!
//! Run with: cargo test -p kindred-test --test conformance --features kindred-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use kindred_test::fixture::{registry, Fixture};
use std::fs;
use std::path::{Path, PathBuf};

/// The fixtures directory of this crate.
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    println!("Running fixture file: {}", path.display());

    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_selection() {
    run_fixture_file("01_selection.yaml");
}

#[test]
fn test_children() {
    run_fixture_file("02_children.yaml");
}

#[test]
fn test_arrays() {
    run_fixture_file("03_arrays.yaml");
}

#[test]
fn test_errors() {
    run_fixture_file("04_errors.yaml");
}

#[test]
fn test_every_fixture_file_is_run() {
    let mut names: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "01_selection.yaml",
            "02_children.yaml",
            "03_arrays.yaml",
            "04_errors.yaml"
        ]
    );
}

#[test]
fn test_failing_case_is_reported() {
    let yaml = r#"
name: wrong expectation
template:
  rules:
    - match: { type: exact, field: kind, value: circle }
      type: test.Circle
cases:
  - name: claims square
    input: '{"kind":"circle"}'
    expect_type: test.Square
"#;
    let fixture = Fixture::from_yaml(yaml).unwrap();
    let results = fixture.run(&registry()).unwrap();
    assert_eq!(results.len(), 1);
    assert!(!results[0].passed);
    assert_eq!(
        results[0].detail,
        "expected type test.Square, got test.Circle"
    );
}
