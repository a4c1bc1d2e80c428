//! xpect - expect-style assertion extensions over JSON values
//!
//! A toolkit for building custom `expect`-style assertions that check
//! whether a runtime value satisfies a declared partial shape.
//!
//! # Architecture
//!
//! An extension is a composition of three stages, each behind its own seam:
//!
//! - [`ValueGuard`] — Runtime type validation of the actual value
//! - [`ArgPolicy`] — Presence policy for the per-call expected argument
//! - [`ValueCheck`] — The core predicate, producing a [`CheckResult`]
//! - [`Verdict`] — The harness-facing result (pass flag + lazy message)
//!
//! [`GuardedExtension`] wires the stages together; [`StaticConditionExtension`]
//! and [`DeepMatchExtension`] are the two concrete forms (shape fixed at
//! definition time vs. supplied per call).
//!
//! # Key Design Insights
//!
//! 1. **The match algorithm is delegated**: structural comparison lives
//!    behind the [`StructuralMatch`] seam, implemented by `assert-json-diff`
//!    in inclusive mode. This crate never walks JSON trees itself.
//!
//! 2. **Failures are data**: a comparator signals a mismatch by panicking
//!    (the assertion-library convention); [`checked_match`] confines the
//!    unwind and every failure path resolves to a returned [`Verdict`].
//!
//! 3. **The guard is the source of truth for input typing**: static types on
//!    the caller's side document intent, the runtime guard enforces it.
//!
//! # Example
//!
//! ```
//! use xpect::prelude::*;
//! use serde_json::json;
//!
//! // Define the assertion once: a guard plus a fixed partial shape.
//! let extension = StaticConditionExtension::new(
//!     Box::new(StringFieldGuard::new("status")),
//!     json!({ "status": "ok" }),
//! );
//!
//! // Apply it per test; extra fields on the actual value are permitted.
//! let verdict = extension.extension_method(&json!({ "status": "ok", "retries": 2 }));
//! assert!(verdict.pass());
//!
//! let verdict = extension.extension_method(&json!({ "status": "fail" }));
//! assert!(!verdict.pass());
//! assert!(verdict.message().contains("status"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod deep_match;
mod extension;
mod guard;
mod outcome;
mod registry;
mod static_condition;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use extension::{ArgPolicy, ExpectExtension, GuardedExtension, ValueCheck};
pub use outcome::{CheckResult, Verdict};
pub use registry::{ExtensionRegistry, ExtensionRegistryBuilder};
pub use static_condition::StaticConditionExtension;

// Structural comparison
pub use deep_match::{checked_match, DeepMatchExtension, JsonSubsetMatch, StructuralMatch};

// Guards
pub use guard::{
    json_type_name, AnyValueGuard, ObjectGuard, PatternFieldGuard, StringFieldGuard, ValueGuard,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use xpect::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Guards
        AnyValueGuard,
        // Argument policy
        ArgPolicy,
        // Outcomes
        CheckResult,
        // Extensions
        DeepMatchExtension,
        ExpectExtension,
        // Errors
        ExtensionError,
        // Registry
        ExtensionRegistry,
        ExtensionRegistryBuilder,
        GuardedExtension,
        // Structural comparison
        JsonSubsetMatch,
        ObjectGuard,
        PatternFieldGuard,
        StaticConditionExtension,
        StringFieldGuard,
        StructuralMatch,
        ValueCheck,
        ValueGuard,
        Verdict,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from extension construction and invocation.
///
/// At the harness boundary every invocation error becomes a failing
/// [`Verdict`]; the enum itself surfaces directly only from construction
/// ([`InvalidPattern`](Self::InvalidPattern)) and registry dispatch
/// ([`UnknownExtension`](Self::UnknownExtension)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// The actual value's runtime type failed the guard.
    TypeMismatch {
        /// What the guard required.
        expected: String,
        /// What the value actually was.
        actual: String,
    },
    /// An expected argument was supplied to an assertion that takes none.
    UnexpectedArgument,
    /// An assertion requiring an expected argument was called without one.
    MissingArgument,
    /// The actual value does not structurally satisfy the condition.
    ConditionMismatch {
        /// The comparator's mismatch description.
        message: String,
    },
    /// A comparator failed with a payload that carries no message.
    Unknown,
    /// A guard regex pattern is invalid.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
    /// An extension name was not found in the registry.
    UnknownExtension {
        /// The unregistered name.
        name: String,
        /// Names that ARE registered (for self-correcting error messages).
        available: Vec<String>,
    },
}

impl std::fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type validation failed: expected {expected}, got {actual}")
            }
            Self::UnexpectedArgument => {
                write!(f, "assertion takes no expected argument, but one was supplied")
            }
            Self::MissingArgument => {
                write!(f, "assertion requires an expected argument, but none was supplied")
            }
            Self::ConditionMismatch { message } => {
                write!(f, "{message}")
            }
            Self::Unknown => {
                write!(f, "Unknown error in assertion")
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
            Self::UnknownExtension { name, available } => {
                write!(f, "unknown extension \"{name}\"")?;
                if available.is_empty() {
                    write!(f, " — no extensions are registered")
                } else {
                    write!(f, " — registered: {}", available.join(", "))
                }
            }
        }
    }
}

impl std::error::Error for ExtensionError {}
