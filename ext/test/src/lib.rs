//! xpect-test: conformance fixtures for xpect extensions
//!
//! Provides verdict assertion helpers, a reference comparator stub, and a
//! YAML fixture runner. This is the reference harness that demonstrates how
//! to drive xpect extensions from the outside.
//!
//! # Example
//!
//! ```
//! use xpect_test::prelude::*;
//! use serde_json::json;
//!
//! let extension = StaticConditionExtension::new(
//!     Box::new(StringFieldGuard::new("status")),
//!     json!({ "status": "ok" }),
//! );
//!
//! assert_passes(&extension.extension_method(&json!({ "status": "ok" })));
//! assert_fails_containing(&extension.extension_method(&json!({ "status": "no" })), "status");
//! ```

use serde_json::Value;
use xpect::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Assert that a verdict passed, reporting its message otherwise.
///
/// # Panics
///
/// Panics when the verdict failed.
pub fn assert_passes(verdict: &Verdict) {
    assert!(
        verdict.pass(),
        "expected a passing verdict, got failure: {}",
        verdict.message()
    );
}

/// Assert that a verdict failed with a message containing `needle`.
///
/// # Panics
///
/// Panics when the verdict passed, or when its message does not contain
/// `needle`.
pub fn assert_fails_containing(verdict: &Verdict, needle: &str) {
    assert!(!verdict.pass(), "expected a failing verdict, got a pass");
    let message = verdict.message();
    assert!(
        message.contains(needle),
        "failure message \"{message}\" does not contain \"{needle}\""
    );
}

/// Comparator stub that fails with a payload carrying no message.
///
/// Used to exercise the normalization path for comparators whose failure
/// payload is not a string: the resulting verdict reports the generic
/// unknown-error message.
#[derive(Debug, Clone, Default)]
pub struct OpaquePanicMatch;

impl OpaquePanicMatch {
    /// Create the stub comparator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Marker payload with no message content.
struct OpaquePayload;

impl StructuralMatch for OpaquePanicMatch {
    fn assert_matches(&self, _actual: &Value, _expected: &Value) {
        std::panic::panic_any(OpaquePayload);
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{assert_fails_containing, assert_passes, OpaquePanicMatch};
    pub use xpect::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn status_extension() -> StaticConditionExtension {
        StaticConditionExtension::new(
            Box::new(StringFieldGuard::new("status")),
            json!({ "status": "ok" }),
        )
    }

    #[test]
    fn helpers_accept_matching_verdicts() {
        let extension = status_extension();
        assert_passes(&extension.extension_method(&json!({ "status": "ok", "extra": 1 })));
        assert_fails_containing(&extension.extension_method(&json!({ "status": "no" })), "status");
    }

    #[test]
    #[should_panic(expected = "expected a passing verdict")]
    fn assert_passes_panics_on_failure() {
        let extension = status_extension();
        assert_passes(&extension.extension_method(&json!(42)));
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn assert_fails_containing_panics_on_wrong_message() {
        let extension = status_extension();
        assert_fails_containing(&extension.extension_method(&json!(42)), "not-in-message");
    }

    #[test]
    fn opaque_panic_match_yields_unknown_error_message() {
        let extension = StaticConditionExtension::with_comparator(
            Box::new(AnyValueGuard::new()),
            json!({ "status": "ok" }),
            Arc::new(OpaquePanicMatch::new()),
        );
        let verdict = extension.extension_method(&json!({ "status": "ok" }));
        assert!(!verdict.pass());
        assert_eq!(verdict.message(), "Unknown error in assertion");
    }
}
