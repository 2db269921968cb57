//! Target model
//!
//! A target is one assessed system (web application, repository, network
//! range, ...). Besides `category` and `name`, targets carry free-form,
//! category-specific fields which are kept verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SeretoError;

/// Persisted form of a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetModel {
    /// Category, e.g. `dast`, `sast`
    pub category: String,

    /// Display name
    pub name: String,

    /// Category-specific fields (URLs, IP ranges, repository links, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetModel {
    /// Create a target with no extra fields
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Attach a category-specific field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Unique name of the target
    ///
    /// Used as the directory name holding the target's findings, so only
    /// lowercase ASCII alphanumerics and `_` survive.
    /// e.g. category "dast", name "Customer Portal" -> "target_dast_customer_portal"
    #[must_use]
    pub fn uname(&self) -> String {
        format!("target_{}_{}", self.category, self.name)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }

    /// Check the fields that are constrained beyond their type
    pub fn validate(&self) -> Result<(), SeretoError> {
        if !is_identifier(&self.category, 20) {
            return Err(SeretoError::parse(
                "target category",
                format!(
                    "'{}' (1-20 characters from a-z, A-Z, 0-9, '.', '_', '-')",
                    self.category
                ),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(SeretoError::parse("target name", "name must not be empty"));
        }
        Ok(())
    }
}

/// Check `^[a-zA-Z0-9._-]{1,max}$`
pub(crate) fn is_identifier(s: &str, max: usize) -> bool {
    !s.is_empty()
        && s.len() <= max
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}
