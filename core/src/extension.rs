//! Extension composition — value guard + argument policy + core check.
//!
//! [`ExpectExtension`] is the callable contract a test harness invokes for a
//! custom assertion. [`GuardedExtension`] composes the three validation
//! stages into one extension: the value guard runs first, then the argument
//! policy, then the core check. Every failure — guard, policy, or check —
//! resolves to a returned [`Verdict`]; nothing unwinds out of `apply`.

use crate::{CheckResult, ExtensionError, ValueGuard, Verdict};
use serde_json::Value;
use std::fmt::Debug;

/// A custom assertion pluggable into a test harness.
///
/// The harness invokes [`apply`](Self::apply) with the actual value under
/// test and the optional per-call expected argument, and renders the
/// returned [`Verdict`].
///
/// Invocations are stateless: an extension holds only construction-time
/// state, so applying the same extension twice to the same value yields the
/// same verdict.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one extension instance can
/// serve assertions from concurrent test threads.
pub trait ExpectExtension: Send + Sync + Debug {
    /// Apply the assertion to `actual`.
    ///
    /// `expected` is the optional per-call argument the harness forwards.
    /// Extensions with a static condition reject it; see [`ArgPolicy`].
    fn apply(&self, actual: &Value, expected: Option<&Value>) -> Verdict;
}

// Blanket implementation for boxed extensions
impl ExpectExtension for Box<dyn ExpectExtension> {
    fn apply(&self, actual: &Value, expected: Option<&Value>) -> Verdict {
        (**self).apply(actual, expected)
    }
}

/// Whether an extension takes a per-call expected argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPolicy {
    /// The assertion takes only the actual value. Supplying an expected
    /// argument is a caller error.
    Void,
    /// The assertion requires an expected argument at every call.
    Required,
}

impl ArgPolicy {
    /// Validate the presence or absence of the expected argument.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::UnexpectedArgument`] when a `Void` assertion
    /// receives an argument; [`ExtensionError::MissingArgument`] when a
    /// `Required` assertion does not.
    pub fn validate(self, expected: Option<&Value>) -> Result<(), ExtensionError> {
        match (self, expected) {
            (Self::Void, Some(_)) => Err(ExtensionError::UnexpectedArgument),
            (Self::Required, None) => Err(ExtensionError::MissingArgument),
            _ => Ok(()),
        }
    }
}

/// Core predicate of an extension, run after both validations pass.
///
/// Checks receive the actual value and the (already policy-validated)
/// expected argument and return the simple [`CheckResult`]; expansion to a
/// [`Verdict`] happens in the wrapper, keeping checks harness-agnostic.
pub trait ValueCheck: Send + Sync + Debug {
    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns the error describing why the check failed.
    fn check(&self, actual: &Value, expected: Option<&Value>) -> CheckResult;
}

/// Extension composed of a value guard, an argument policy, and a check.
///
/// Invocation order:
/// 1. the guard validates the actual value's runtime type,
/// 2. the policy validates the expected argument's presence,
/// 3. the check runs.
///
/// The first failing stage short-circuits the rest; the failure becomes the
/// returned verdict's message.
#[derive(Debug)]
pub struct GuardedExtension {
    guard: Box<dyn ValueGuard>,
    arg_policy: ArgPolicy,
    check: Box<dyn ValueCheck>,
}

impl GuardedExtension {
    /// Compose a guard, an argument policy, and a check into an extension.
    #[must_use]
    pub fn new(guard: Box<dyn ValueGuard>, arg_policy: ArgPolicy, check: Box<dyn ValueCheck>) -> Self {
        Self {
            guard,
            arg_policy,
            check,
        }
    }

    /// The argument policy of this extension.
    #[must_use]
    pub fn arg_policy(&self) -> ArgPolicy {
        self.arg_policy
    }

    fn run(&self, actual: &Value, expected: Option<&Value>) -> CheckResult {
        self.guard.validate(actual)?;
        self.arg_policy.validate(expected)?;
        self.check.check(actual, expected)
    }
}

impl ExpectExtension for GuardedExtension {
    fn apply(&self, actual: &Value, expected: Option<&Value>) -> Verdict {
        Verdict::from_check(self.run(actual, expected))
    }
}
