//! Static-condition extensions — the expected shape is fixed when the
//! assertion is defined, not supplied per call.
//!
//! This is the factory for assertions of the form "the value looks like
//! THIS", where THIS is a partial object pattern known up front. The
//! extension owns the condition for its lifetime; callers only ever supply
//! the actual value.

use crate::deep_match::{checked_match, JsonSubsetMatch, StructuralMatch};
use crate::{
    ArgPolicy, CheckResult, ExpectExtension, GuardedExtension, ValueCheck, ValueGuard, Verdict,
};
use serde_json::Value;
use std::sync::Arc;

/// Check comparing the actual value against a fixed condition.
#[derive(Debug)]
struct StaticConditionCheck {
    condition: Value,
    comparator: Arc<dyn StructuralMatch>,
}

impl ValueCheck for StaticConditionCheck {
    fn check(&self, actual: &Value, _expected: Option<&Value>) -> CheckResult {
        checked_match(&*self.comparator, actual, &self.condition)
    }
}

/// An expect extension bound to a static condition.
///
/// Bundles a runtime type guard with an immutable partial-object condition.
/// [`extension_method`](Self::extension_method) validates the actual value's
/// type, delegates the deep partial match against the condition, and reports
/// the outcome as a [`Verdict`].
///
/// Construction is pure assembly — nothing is validated until the first
/// invocation. Guard and condition are fixed for the instance's lifetime,
/// and invocations share no state, so the same instance can be applied from
/// any number of threads.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{StaticConditionExtension, StringFieldGuard};
///
/// let extension = StaticConditionExtension::new(
///     Box::new(StringFieldGuard::new("status")),
///     json!({ "status": "ok" }),
/// );
///
/// // Extra fields on the actual value are permitted.
/// let verdict = extension.extension_method(&json!({ "status": "ok", "retries": 2 }));
/// assert!(verdict.pass());
///
/// // A mismatched field fails with a message naming it.
/// let verdict = extension.extension_method(&json!({ "status": "fail" }));
/// assert!(!verdict.pass());
/// assert!(verdict.message().contains("status"));
///
/// // A value of the wrong type fails at the guard, before any comparison.
/// let verdict = extension.extension_method(&json!(42));
/// assert!(!verdict.pass());
/// ```
#[derive(Debug)]
pub struct StaticConditionExtension {
    condition: Value,
    inner: GuardedExtension,
}

impl StaticConditionExtension {
    /// Create an extension checking `condition` with the default JSON subset
    /// comparator.
    #[must_use]
    pub fn new(guard: Box<dyn ValueGuard>, condition: Value) -> Self {
        Self::with_comparator(guard, condition, Arc::new(JsonSubsetMatch::new()))
    }

    /// Create an extension with an explicit comparator.
    ///
    /// The comparator seam is how the structural match is retargeted to a
    /// different assertion library, or stubbed out in tests.
    #[must_use]
    pub fn with_comparator(
        guard: Box<dyn ValueGuard>,
        condition: Value,
        comparator: Arc<dyn StructuralMatch>,
    ) -> Self {
        let check = StaticConditionCheck {
            condition: condition.clone(),
            comparator,
        };
        Self {
            condition,
            inner: GuardedExtension::new(guard, ArgPolicy::Void, Box::new(check)),
        }
    }

    /// The condition this extension checks against.
    #[must_use]
    pub fn condition(&self) -> &Value {
        &self.condition
    }

    /// Apply the assertion to `actual`.
    ///
    /// Equivalent to [`ExpectExtension::apply`] with no expected argument —
    /// this is the surface a harness binds as the custom assertion method.
    #[must_use]
    pub fn extension_method(&self, actual: &Value) -> Verdict {
        self.apply(actual, None)
    }
}

impl ExpectExtension for StaticConditionExtension {
    fn apply(&self, actual: &Value, expected: Option<&Value>) -> Verdict {
        self.inner.apply(actual, expected)
    }
}
