//! Version identifiers
//!
//! - [`ProjectVersion`]: `v<major>.<minor>`, one snapshot of a project's configuration
//! - [`SeretoVersion`]: semantic version of the tool that wrote the document

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SeretoError;

/// Project version, e.g. `v1.0` or `v2.3`
///
/// The leading `v` is optional when parsing and always present when displayed.
/// Ordering is numeric: `v1.10` sorts after `v1.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectVersion {
    major: u64,
    minor: u64,
}

impl ProjectVersion {
    /// Create a version from its components
    #[must_use]
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Major component
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// Minor component
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// First version of the next major series (`v1.3` -> `v2.0`)
    pub fn next_major(&self) -> Result<Self, SeretoError> {
        self.major
            .checked_add(1)
            .map(|major| Self::new(major, 0))
            .ok_or_else(|| SeretoError::parse("version", format!("no major version after {self}")))
    }
}

impl Default for ProjectVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl FromStr for ProjectVersion {
    type Err = SeretoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let digits = raw.strip_prefix(['v', 'V']).unwrap_or(raw);

        let (major, minor) = digits
            .split_once('.')
            .ok_or_else(|| SeretoError::parse("version", format!("'{s}' (expected e.g. v1.0)")))?;

        let component = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SeretoError::parse("version", format!("'{s}' (expected e.g. v1.0)")));
            }
            part.parse::<u64>().map_err(|e| SeretoError::parse("version", format!("'{s}': {e}")))
        };

        Ok(Self::new(component(major)?, component(minor)?))
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

impl Serialize for ProjectVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProjectVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Version of the tool that produced a configuration document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeretoVersion(semver::Version);

impl SeretoVersion {
    /// Version of this build
    #[must_use]
    pub fn current() -> Self {
        Self(semver::Version::new(
            env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        ))
    }
}

impl FromStr for SeretoVersion {
    type Err = SeretoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('v').unwrap_or(raw);
        semver::Version::parse(raw)
            .map(Self)
            .map_err(|e| SeretoError::parse("tool version", format!("'{s}': {e}")))
    }
}

impl fmt::Display for SeretoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
