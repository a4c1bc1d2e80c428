//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against xpect extensions.

use serde::Deserialize;
use serde_json::Value;
use xpect::prelude::*;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub extension: ExtensionConfig,
    pub cases: Vec<TestCase>,
}

/// Extension configuration from YAML
///
/// With a `condition`, builds a static-condition extension; without one,
/// builds a deep-match extension that takes the shape per call.
#[derive(Debug, Deserialize)]
pub struct ExtensionConfig {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub guard: GuardConfig,
    #[serde(default)]
    pub condition: Option<Value>,
}

/// Guard configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardConfig {
    Any,
    Object,
    StringField { key: String },
    PatternField { key: String, pattern: String },
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub actual: Value,
    #[serde(default)]
    pub expected: Option<Value>,
    pub expect_pass: bool,
    #[serde(default)]
    pub message_contains: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert config to xpect types
// ═══════════════════════════════════════════════════════════════════════════════

impl GuardConfig {
    /// Build a guard from this config
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::InvalidPattern`] for an invalid regex.
    pub fn build(&self) -> Result<Box<dyn ValueGuard>, ExtensionError> {
        Ok(match self {
            GuardConfig::Any => Box::new(AnyValueGuard::new()),
            GuardConfig::Object => Box::new(ObjectGuard::new()),
            GuardConfig::StringField { key } => Box::new(StringFieldGuard::new(key)),
            GuardConfig::PatternField { key, pattern } => {
                Box::new(PatternFieldGuard::new(key, pattern)?)
            }
        })
    }
}

impl ExtensionConfig {
    /// Build an extension from this config
    ///
    /// # Errors
    ///
    /// Propagates guard construction errors.
    pub fn build(&self) -> Result<Box<dyn ExpectExtension>, ExtensionError> {
        let guard = self.guard.build()?;
        Ok(match &self.condition {
            Some(condition) => Box::new(StaticConditionExtension::new(guard, condition.clone())),
            None => Box::new(DeepMatchExtension::new(guard)),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub pass: bool,
    pub message: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    ///
    /// # Errors
    ///
    /// Returns the YAML deserialization error.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    ///
    /// # Errors
    ///
    /// Returns the first YAML deserialization error.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    ///
    /// A case passes when the verdict's pass flag equals `expect_pass` and,
    /// if `message_contains` is set, the message contains that needle.
    ///
    /// # Errors
    ///
    /// Returns the extension construction error.
    pub fn run(&self) -> Result<Vec<CaseResult>, ExtensionError> {
        let extension = self.extension.build()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let verdict = extension.apply(&case.actual, case.expected.as_ref());
                let message = verdict.message();
                let mut passed = verdict.pass() == case.expect_pass;
                if let Some(needle) = &case.message_contains {
                    passed = passed && message.contains(needle);
                }
                CaseResult {
                    case_name: case.name.clone(),
                    passed,
                    pass: verdict.pass(),
                    message,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    ///
    /// # Panics
    ///
    /// Panics when the extension fails to build or any case fails.
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: pass={}, message={:?}",
                self.name, result.case_name, result.pass, result.message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_parses_and_runs() {
        let yaml = r#"
name: status check
description: static condition over a string field
extension:
  guard:
    string_field:
      key: status
  condition:
    status: ok
cases:
  - name: superset passes
    actual:
      status: ok
      extra: 1
    expect_pass: true
  - name: mismatch fails
    actual:
      status: fail
    expect_pass: false
    message_contains: status
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn fixture_without_condition_builds_deep_match_extension() {
        let yaml = r#"
name: per-call shape
description: expected shape supplied by each case
extension:
  guard: object
cases:
  - name: matching shape passes
    actual:
      a: 1
      b: 2
    expected:
      a: 1
    expect_pass: true
  - name: missing argument fails
    actual:
      a: 1
    expect_pass: false
    message_contains: requires an expected argument
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document_yaml_parses_into_fixtures() {
        let yaml = r#"
name: first
description: one
extension:
  guard: any
  condition:
    a: 1
cases: []
---
name: second
description: two
extension:
  guard: any
  condition:
    b: 2
cases: []
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].name, "first");
        assert_eq!(fixtures[1].name, "second");
    }

    #[test]
    fn invalid_guard_pattern_surfaces_as_build_error() {
        let config = ExtensionConfig {
            guard: GuardConfig::PatternField {
                key: "id".to_string(),
                pattern: "(unclosed".to_string(),
            },
            condition: Some(json!({ "id": "x" })),
        };
        assert!(matches!(
            config.build().unwrap_err(),
            ExtensionError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn run_reports_case_results() {
        let yaml = r#"
name: reporting
description: result bookkeeping
extension:
  guard: any
  condition:
    ok: true
cases:
  - name: passes
    actual:
      ok: true
    expect_pass: true
  - name: wrong expectation
    actual:
      ok: true
    expect_pass: false
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run().unwrap();
        assert!(results[0].passed);
        assert!(!results[1].passed);
    }
}
