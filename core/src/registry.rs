//! Named extension registry — how a harness wires custom assertions in.
//!
//! Extensions are registered under a name at setup time and dispatched by
//! name at assertion time. The builder pattern enforces immutability after
//! initialization: no runtime registration is possible once
//! [`build()`](ExtensionRegistryBuilder::build) has run, so a registry can
//! be shared freely across test threads.

use crate::{ExpectExtension, ExtensionError, Verdict};
use serde_json::Value;
use std::collections::HashMap;

/// Builder for constructing an [`ExtensionRegistry`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xpect::{ExtensionRegistryBuilder, StaticConditionExtension, StringFieldGuard};
///
/// let registry = ExtensionRegistryBuilder::new()
///     .extension(
///         "to_be_ok",
///         StaticConditionExtension::new(
///             Box::new(StringFieldGuard::new("status")),
///             json!({ "status": "ok" }),
///         ),
///     )
///     .build();
///
/// let verdict = registry
///     .apply("to_be_ok", &json!({ "status": "ok" }), None)
///     .unwrap();
/// assert!(verdict.pass());
/// ```
#[derive(Debug, Default)]
pub struct ExtensionRegistryBuilder {
    extensions: HashMap<String, Box<dyn ExpectExtension>>,
}

impl ExtensionRegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: HashMap::new(),
        }
    }

    /// Register an extension under `name`.
    ///
    /// Registering the same name twice replaces the earlier entry — last
    /// registration wins.
    #[must_use]
    pub fn extension(mut self, name: &str, extension: impl ExpectExtension + 'static) -> Self {
        self.extensions.insert(name.to_owned(), Box::new(extension));
        self
    }

    /// Finalize into an immutable registry.
    #[must_use]
    pub fn build(self) -> ExtensionRegistry {
        ExtensionRegistry {
            extensions: self.extensions,
        }
    }
}

/// Immutable registry of named extensions.
#[derive(Debug)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Box<dyn ExpectExtension>>,
}

impl ExtensionRegistry {
    /// Look up an extension by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ExpectExtension> {
        self.extensions.get(name).map(Box::as_ref)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Registered extension names, sorted.
    #[must_use]
    pub fn extension_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Dispatch an assertion to the named extension.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::UnknownExtension`] — carrying the list of
    /// registered names for a self-correcting message — when `name` is not
    /// registered.
    pub fn apply(
        &self,
        name: &str,
        actual: &Value,
        expected: Option<&Value>,
    ) -> Result<Verdict, ExtensionError> {
        let Some(extension) = self.get(name) else {
            return Err(ExtensionError::UnknownExtension {
                name: name.to_owned(),
                available: self
                    .extension_names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            });
        };
        Ok(extension.apply(actual, expected))
    }
}
