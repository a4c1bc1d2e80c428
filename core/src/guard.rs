//! `ValueGuard` — runtime type validation of assertion inputs.
//!
//! Guards confirm the actual value's runtime type before any structural
//! comparison runs. The guard is the sole source of truth for input typing:
//! static types on the caller's side are documentation, not enforcement.
//!
//! A guard fails by returning an error, never by panicking; the failure is
//! surfaced through the extension's [`Verdict`](crate::Verdict).
//!
//! # Available Guards
//!
//! - [`AnyValueGuard`] — accepts every value
//! - [`ObjectGuard`] — requires a JSON object
//! - [`StringFieldGuard`] — requires an object with a string-typed field
//! - [`PatternFieldGuard`] — requires a string field matching a regex

use crate::ExtensionError;
use serde_json::Value;
use std::fmt::Debug;

/// Validates the runtime type of an actual value.
///
/// Guards run before the core check of an extension; a failing guard stops
/// the invocation and the structural condition is never consulted.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one extension instance can
/// be shared across concurrent test threads.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{ObjectGuard, ValueGuard};
///
/// let guard = ObjectGuard::new();
/// assert!(guard.validate(&json!({ "any": "object" })).is_ok());
/// assert!(guard.validate(&json!(42)).is_err());
/// ```
pub trait ValueGuard: Send + Sync + Debug {
    /// Validate the value's runtime type.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::TypeMismatch`] describing the expected and
    /// actual types when validation fails.
    fn validate(&self, value: &Value) -> Result<(), ExtensionError>;
}

// Blanket implementation for boxed guards
impl ValueGuard for Box<dyn ValueGuard> {
    fn validate(&self, value: &Value) -> Result<(), ExtensionError> {
        (**self).validate(value)
    }
}

/// Returns the JSON type name of a value, for guard failure messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Concrete Guards
// ═══════════════════════════════════════════════════════════════════════════════

/// Guard that accepts every value.
///
/// Use when an extension's condition alone carries the whole contract and no
/// type narrowing is wanted.
#[derive(Debug, Clone, Default)]
pub struct AnyValueGuard;

impl AnyValueGuard {
    /// Create a guard that accepts every value.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ValueGuard for AnyValueGuard {
    fn validate(&self, _value: &Value) -> Result<(), ExtensionError> {
        Ok(())
    }
}

/// Guard requiring the value to be a JSON object.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{ObjectGuard, ValueGuard};
///
/// let guard = ObjectGuard::new();
/// assert!(guard.validate(&json!({})).is_ok());
/// assert!(guard.validate(&json!([1, 2])).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectGuard;

impl ObjectGuard {
    /// Create a guard requiring a JSON object.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ValueGuard for ObjectGuard {
    fn validate(&self, value: &Value) -> Result<(), ExtensionError> {
        if value.is_object() {
            Ok(())
        } else {
            Err(ExtensionError::TypeMismatch {
                expected: "object".to_string(),
                actual: json_type_name(value).to_string(),
            })
        }
    }
}

/// Guard requiring an object with a string-typed field.
///
/// A non-object value fails at the object level — the failure message names
/// only the expected outer type, not the field. Only once the value is an
/// object does the message mention the missing or mistyped field.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{StringFieldGuard, ValueGuard};
///
/// let guard = StringFieldGuard::new("status");
/// assert!(guard.validate(&json!({ "status": "ok" })).is_ok());
/// assert!(guard.validate(&json!({ "status": 7 })).is_err());
/// assert!(guard.validate(&json!(42)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StringFieldGuard {
    key: String,
}

impl StringFieldGuard {
    /// Create a guard requiring a string-typed field named `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The field name this guard checks.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ValueGuard for StringFieldGuard {
    fn validate(&self, value: &Value) -> Result<(), ExtensionError> {
        let Some(object) = value.as_object() else {
            return Err(ExtensionError::TypeMismatch {
                expected: "object".to_string(),
                actual: json_type_name(value).to_string(),
            });
        };

        match object.get(&self.key) {
            Some(Value::String(_)) => Ok(()),
            Some(other) => Err(ExtensionError::TypeMismatch {
                expected: format!("object with string field \"{}\"", self.key),
                actual: format!("field of type {}", json_type_name(other)),
            }),
            None => Err(ExtensionError::TypeMismatch {
                expected: format!("object with string field \"{}\"", self.key),
                actual: "object without that field".to_string(),
            }),
        }
    }
}

/// Guard requiring a string field whose value matches a regex.
///
/// Patterns compile at construction time; an invalid pattern is a
/// construction error, not a validation-time failure.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{PatternFieldGuard, ValueGuard};
///
/// let guard = PatternFieldGuard::new("id", r"^user-\d+$").unwrap();
/// assert!(guard.validate(&json!({ "id": "user-42" })).is_ok());
/// assert!(guard.validate(&json!({ "id": "admin" })).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternFieldGuard {
    key: String,
    pattern: regex::Regex,
}

impl PatternFieldGuard {
    /// Create a guard requiring field `key` to match `pattern`.
    ///
    /// Uses Rust's `regex` crate which guarantees linear time matching.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn new(key: impl Into<String>, pattern: &str) -> Result<Self, ExtensionError> {
        let compiled = regex::Regex::new(pattern).map_err(|e| ExtensionError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e.to_string(),
        })?;
        Ok(Self {
            key: key.into(),
            pattern: compiled,
        })
    }

    /// The field name this guard checks.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The pattern the field value must match.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl ValueGuard for PatternFieldGuard {
    fn validate(&self, value: &Value) -> Result<(), ExtensionError> {
        let Some(object) = value.as_object() else {
            return Err(ExtensionError::TypeMismatch {
                expected: "object".to_string(),
                actual: json_type_name(value).to_string(),
            });
        };

        let field = match object.get(&self.key) {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(ExtensionError::TypeMismatch {
                    expected: format!("object with string field \"{}\"", self.key),
                    actual: format!("field of type {}", json_type_name(other)),
                })
            }
            None => {
                return Err(ExtensionError::TypeMismatch {
                    expected: format!("object with string field \"{}\"", self.key),
                    actual: "object without that field".to_string(),
                })
            }
        };

        if self.pattern.is_match(field) {
            Ok(())
        } else {
            Err(ExtensionError::TypeMismatch {
                expected: format!("field \"{}\" matching /{}/", self.key, self.pattern.as_str()),
                actual: format!("\"{field}\""),
            })
        }
    }
}
