//! Findings of a single target
//!
//! Stored next to the target's other files: `<project>/<uname>/findings.toml`.
//! A missing file means no findings were recorded yet.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeretoError};
use crate::models::ProjectVersion;
use crate::paths::FINDINGS_FILE;

/// Risk rating of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    /// Critical
    Critical,
    /// High
    High,
    /// Medium
    Medium,
    /// Low
    Low,
    /// Informational
    Info,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
            Self::Info => write!(f, "info"),
        }
    }
}

impl FromStr for Risk {
    type Err = SeretoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" | "med" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "info" | "informational" => Ok(Self::Info),
            _ => Err(SeretoError::parse("risk", format!("{s}. Use: critical, high, medium, low, info"))),
        }
    }
}

/// Findings reported together under one heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingGroup {
    /// Heading in the report
    pub name: String,
    /// `path_name`s of the included findings
    #[serde(default)]
    pub findings: Vec<String>,
}

/// A finding discovered on the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Human readable title
    pub name: String,
    /// File stem of the finding template
    pub path_name: String,
    /// Risk at each project version
    #[serde(default)]
    pub risks: BTreeMap<ProjectVersion, Risk>,
    /// Template variables
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub vars: toml::Table,
}

/// Number of findings per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    /// Critical findings
    pub critical: usize,
    /// High findings
    pub high: usize,
    /// Medium findings
    pub medium: usize,
    /// Low findings
    pub low: usize,
    /// Informational findings
    pub info: usize,
}

impl RiskCounts {
    /// Total number of counted findings
    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// Contents of a target's findings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingsConfig {
    /// Findings selected for the report, grouped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub report_include: Vec<FindingGroup>,
    /// All findings known for the target
    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl FindingsConfig {
    /// Path of the findings file inside a target directory
    #[must_use]
    pub fn file_path(target_dir: &Path) -> PathBuf {
        target_dir.join(FINDINGS_FILE)
    }

    /// Load findings for a target directory, empty if the file does not exist
    pub fn load(target_dir: &Path) -> Result<Self> {
        let path = Self::file_path(target_dir);
        if !path.exists() {
            log::debug!("no findings file at {}", path.display());
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(&path).map_err(|e| SeretoError::io("cannot read", &path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Save findings into a target directory, creating it if needed
    pub fn save(&self, target_dir: &Path) -> Result<()> {
        fs::create_dir_all(target_dir)
            .map_err(|e| SeretoError::io("cannot create directory", target_dir, e))?;
        let path = Self::file_path(target_dir);
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| SeretoError::io("cannot write", &path, e))?;
        Ok(())
    }

    /// Count findings by their risk at a version; findings without a rating at
    /// that version are skipped
    #[must_use]
    pub fn risk_counts(&self, version: ProjectVersion) -> RiskCounts {
        self.findings.iter().filter_map(|f| f.risks.get(&version)).fold(
            RiskCounts::default(),
            |mut counts, risk| {
                match risk {
                    Risk::Critical => counts.critical += 1,
                    Risk::High => counts.high += 1,
                    Risk::Medium => counts.medium += 1,
                    Risk::Low => counts.low += 1,
                    Risk::Info => counts.info += 1,
                }
                counts
            },
        )
    }
}
