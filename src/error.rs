//! Error types for configuration handling
//!
//! Every failure inside the library aborts the requested operation and is
//! reported through [`SeretoError`]. Mutators check their input before touching
//! any list, so a returned error leaves the receiver unchanged.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ProjectVersion;

/// Library result alias
pub type Result<T> = std::result::Result<T, SeretoError>;

/// Errors produced while querying, mutating, loading or saving configuration
#[derive(Debug, Error)]
pub enum SeretoError {
    /// Ambiguous or empty selection
    #[error("cannot select target: {0}")]
    Selection(String),

    /// 1-based index outside of `1..=len`
    #[error("index {index} out of range (expected 1..={len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the list at the time of the request
        len: usize,
    },

    /// Requested version does not exist
    #[error("version '{0}' not found")]
    UnknownVersion(ProjectVersion),

    /// Version already present when inserting
    #[error("version '{0}' already exists")]
    DuplicateVersion(ProjectVersion),

    /// Target unique name already present in the version
    #[error("target with uname '{0}' already exists")]
    DuplicateTarget(String),

    /// Configuration has no versions at all
    #[error("configuration does not contain any version")]
    EmptyConfig,

    /// Malformed version, date, type or pattern string
    #[error("invalid {kind}: {message}")]
    Parse {
        /// What was being parsed (e.g. "version", "date")
        kind: &'static str,
        /// Parser message
        message: String,
    },

    /// Persisted document failed structural or semantic validation
    #[error("invalid config at '{path}': {message}")]
    Validation {
        /// JSON pointer to the offending value (empty for the document root)
        path: String,
        /// Human-readable message
        message: String,
    },

    /// Filesystem access failed
    #[error("{action} '{}': {source}", path.display())]
    Io {
        /// What was attempted ("cannot read", "cannot write", ...)
        action: &'static str,
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Findings file could not be parsed
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Findings file could not be written
    #[error("toml write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl SeretoError {
    /// Create a parse error
    #[must_use]
    pub fn parse(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            message: message.into(),
        }
    }

    /// Create a validation error at a JSON pointer
    #[must_use]
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error bound to a path
    #[must_use]
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Check whether this is a selection error
    #[must_use]
    pub const fn is_selection(&self) -> bool {
        matches!(self, Self::Selection(_))
    }

    /// Check whether this is a range error
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

/// Convert a 1-based external index into a 0-based position.
///
/// The range check happens before any arithmetic, so `0` never wraps.
pub(crate) fn to_position(index: usize, len: usize) -> Result<usize> {
    if index == 0 || index > len {
        return Err(SeretoError::IndexOutOfRange { index, len });
    }
    Ok(index - 1)
}
