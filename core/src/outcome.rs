//! Check outcomes — simple results and the harness-facing [`Verdict`].
//!
//! Extensions compute a simple result first ([`CheckResult`]: `Ok` or an
//! [`ExtensionError`]), then expand it into the shape a test harness consumes:
//! a pass flag plus a lazily evaluated failure message. Keeping the expansion
//! in one place ([`Verdict::from_check`]) keeps check logic harness-agnostic —
//! retargeting to a different harness means replacing this one seam.

use crate::ExtensionError;
use std::fmt;

/// Simple result of a single check: success, or the error describing why not.
///
/// This is the internal currency of the crate. Nothing past the extension
/// boundary ever sees it — [`Verdict::from_check`] converts it before return.
pub type CheckResult = Result<(), ExtensionError>;

/// Harness-facing result of applying an extension.
///
/// A `Verdict` carries a pass flag and a message closure. The message is
/// evaluated lazily — harnesses only render it when reporting a failure —
/// and is only meaningful when [`pass()`](Self::pass) is `false`.
///
/// # Example
///
/// ```
/// use xpect::{ExtensionError, Verdict};
///
/// let verdict = Verdict::from_check(Ok(()));
/// assert!(verdict.pass());
///
/// let verdict = Verdict::from_check(Err(ExtensionError::Unknown));
/// assert!(!verdict.pass());
/// assert_eq!(verdict.message(), "Unknown error in assertion");
/// ```
pub struct Verdict {
    pass: bool,
    message: Box<dyn Fn() -> String + Send + Sync>,
}

impl Verdict {
    /// A passing verdict.
    #[must_use]
    pub fn passing() -> Self {
        Self {
            pass: true,
            message: Box::new(|| "check passed".to_string()),
        }
    }

    /// A failing verdict whose message derives from `error`.
    #[must_use]
    pub fn failing(error: ExtensionError) -> Self {
        Self {
            pass: false,
            message: Box::new(move || error.to_string()),
        }
    }

    /// Expand a simple check result into the harness shape.
    ///
    /// Total: every [`CheckResult`], success or failure, maps to a `Verdict`.
    #[must_use]
    pub fn from_check(result: CheckResult) -> Self {
        match result {
            Ok(()) => Self::passing(),
            Err(error) => Self::failing(error),
        }
    }

    /// Whether the check passed.
    #[must_use]
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Render the human-readable message.
    ///
    /// Only meaningful when [`pass()`](Self::pass) is `false`.
    #[must_use]
    pub fn message(&self) -> String {
        (self.message)()
    }
}

impl fmt::Debug for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verdict")
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}
