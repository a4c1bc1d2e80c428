//! Structural comparison — the delegated deep partial-match seam.
//!
//! The matching algorithm itself is not implemented in this crate.
//! [`StructuralMatch`] captures the contract of an assertion-library
//! primitive: panic on the first structural mismatch, return silently on a
//! match. [`JsonSubsetMatch`] is the default implementation, delegating to
//! `assert-json-diff` in inclusive mode — every field of the expected value
//! must be present and matching in the actual value, extra fields on the
//! actual value are permitted.
//!
//! [`checked_match`] is the normalization boundary: it runs a comparator
//! under `catch_unwind` and converts the outcome into a [`CheckResult`], so
//! a mismatch never unwinds past the extension.

use crate::{
    ArgPolicy, CheckResult, ExpectExtension, ExtensionError, GuardedExtension, ValueCheck,
    ValueGuard, Verdict,
};
use serde_json::Value;
use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Deep partial-match comparison primitive.
///
/// Implementations compare `actual` against `expected` and **panic** on the
/// first structural mismatch, staying silent on a match. This mirrors how
/// assertion libraries expose their comparisons, and lets any such library
/// be plugged in behind this one seam.
///
/// Extensions never call a comparator directly — they go through
/// [`checked_match`], which confines the panic and turns it into a value.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so extensions holding them can
/// be shared across concurrent test threads.
pub trait StructuralMatch: Send + Sync + Debug {
    /// Compare `actual` against `expected`.
    ///
    /// # Panics
    ///
    /// Panics on the first structural mismatch. Returns silently on a match.
    fn assert_matches(&self, actual: &Value, expected: &Value);
}

// Blanket implementation for boxed comparators
impl StructuralMatch for Box<dyn StructuralMatch> {
    fn assert_matches(&self, actual: &Value, expected: &Value) {
        (**self).assert_matches(actual, expected);
    }
}

/// Default comparator: inclusive JSON comparison via `assert-json-diff`.
///
/// Inclusive mode means the expected value describes a subset: all of its
/// fields must be present and matching in the actual value, and the actual
/// value may carry extra fields.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{checked_match, JsonSubsetMatch};
///
/// let comparator = JsonSubsetMatch::new();
/// let actual = json!({ "status": "ok", "retries": 2 });
/// assert!(checked_match(&comparator, &actual, &json!({ "status": "ok" })).is_ok());
/// assert!(checked_match(&comparator, &actual, &json!({ "status": "fail" })).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonSubsetMatch;

impl JsonSubsetMatch {
    /// Create the default inclusive JSON comparator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StructuralMatch for JsonSubsetMatch {
    fn assert_matches(&self, actual: &Value, expected: &Value) {
        use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config};

        let config = Config::new(CompareMode::Inclusive);
        if let Err(message) = assert_json_matches_no_panic(actual, expected, config) {
            panic!("{message}");
        }
    }
}

/// Run a comparator and convert its panic-based outcome into a value.
///
/// - match → `Ok(())`
/// - mismatch panic carrying a string payload → the payload becomes a
///   [`ExtensionError::ConditionMismatch`] message
/// - any other payload → [`ExtensionError::Unknown`]
///
/// # Errors
///
/// Returns the normalized mismatch error; never panics for a mismatch.
pub fn checked_match(
    comparator: &dyn StructuralMatch,
    actual: &Value,
    expected: &Value,
) -> CheckResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        comparator.assert_matches(actual, expected);
    }));
    outcome.map_err(mismatch_from_payload)
}

fn mismatch_from_payload(payload: Box<dyn Any + Send>) -> ExtensionError {
    if let Some(message) = payload.downcast_ref::<String>() {
        ExtensionError::ConditionMismatch {
            message: message.clone(),
        }
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        ExtensionError::ConditionMismatch {
            message: (*message).to_string(),
        }
    } else {
        ExtensionError::Unknown
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Per-call expected shape
// ═══════════════════════════════════════════════════════════════════════════════

/// Check comparing the actual value against the per-call expected argument.
#[derive(Debug)]
struct DeepMatchCheck {
    comparator: Arc<dyn StructuralMatch>,
}

impl ValueCheck for DeepMatchCheck {
    fn check(&self, actual: &Value, expected: Option<&Value>) -> CheckResult {
        // The wrapper's argument policy runs first; stay total if invoked directly.
        let Some(expected) = expected else {
            return Err(ExtensionError::MissingArgument);
        };
        checked_match(&*self.comparator, actual, expected)
    }
}

/// Extension whose expected shape is supplied at each call.
///
/// The counterpart of [`StaticConditionExtension`](crate::StaticConditionExtension):
/// the harness forwards the expected value as the per-call argument instead
/// of fixing it at definition time. Omitting the argument is a caller error.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{DeepMatchExtension, ExpectExtension, ObjectGuard};
///
/// let extension = DeepMatchExtension::new(Box::new(ObjectGuard::new()));
/// let actual = json!({ "status": "ok", "retries": 2 });
///
/// let verdict = extension.apply(&actual, Some(&json!({ "status": "ok" })));
/// assert!(verdict.pass());
///
/// let verdict = extension.apply(&actual, None);
/// assert!(!verdict.pass());
/// ```
#[derive(Debug)]
pub struct DeepMatchExtension {
    inner: GuardedExtension,
}

impl DeepMatchExtension {
    /// Create an extension using the default JSON subset comparator.
    #[must_use]
    pub fn new(guard: Box<dyn ValueGuard>) -> Self {
        Self::with_comparator(guard, Arc::new(JsonSubsetMatch::new()))
    }

    /// Create an extension with an explicit comparator.
    #[must_use]
    pub fn with_comparator(guard: Box<dyn ValueGuard>, comparator: Arc<dyn StructuralMatch>) -> Self {
        Self {
            inner: GuardedExtension::new(
                guard,
                ArgPolicy::Required,
                Box::new(DeepMatchCheck { comparator }),
            ),
        }
    }
}

impl ExpectExtension for DeepMatchExtension {
    fn apply(&self, actual: &Value, expected: Option<&Value>) -> Verdict {
        self.inner.apply(actual, expected)
    }
}
