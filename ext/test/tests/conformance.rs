//! Conformance tests that run YAML fixtures against xpect
//!
//! Run with: cargo test -p xpect-test --test conformance --features xpect-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use xpect_test::fixture::Fixture;

/// Fixtures live next to this crate, under ext/test/fixtures.
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a file
fn run_fixture_file(file_name: &str) {
    let path = fixtures_dir().join(file_name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));

    assert!(!fixtures.is_empty(), "{} contains no fixtures", path.display());

    for fixture in fixtures {
        println!("Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_guards() {
    run_fixture_file("01_guards.yaml");
}

#[test]
fn test_static_conditions() {
    run_fixture_file("02_static_conditions.yaml");
}

#[test]
fn test_arguments() {
    run_fixture_file("03_arguments.yaml");
}
