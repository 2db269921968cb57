//! Target with its on-disk location
//!
//! Wraps a [`TargetModel`] together with the directory holding its files
//! (`<project>/<uname>`). The findings file is read on first access only.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::findings::FindingsConfig;
use crate::models::TargetModel;
use crate::paths;

/// A target bound to its directory
#[derive(Debug, Clone)]
pub struct Target {
    data: TargetModel,
    path: PathBuf,
    findings: OnceCell<FindingsConfig>,
}

impl Target {
    /// Bind target data to a directory
    #[must_use]
    pub fn load(data: TargetModel, path: impl Into<PathBuf>) -> Self {
        Self {
            data,
            path: path.into(),
            findings: OnceCell::new(),
        }
    }

    /// Bind target data to its directory under a project root
    #[must_use]
    pub fn in_project(data: TargetModel, project_path: &Path) -> Self {
        let path = paths::target_dir(project_path, &data.uname());
        Self::load(data, path)
    }

    /// Persisted data
    #[must_use]
    pub const fn data(&self) -> &TargetModel {
        &self.data
    }

    /// Directory of the target
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unique name of the target
    #[must_use]
    pub fn uname(&self) -> String {
        self.data.uname()
    }

    /// Findings of the target, loaded from disk on first call
    pub fn findings_config(&self) -> Result<&FindingsConfig> {
        if let Some(findings) = self.findings.get() {
            return Ok(findings);
        }
        let loaded = FindingsConfig::load(&self.path)?;
        Ok(self.findings.get_or_init(|| loaded))
    }

    /// Replace the findings and write them to disk
    pub fn save_findings(&mut self, findings: FindingsConfig) -> Result<()> {
        findings.save(&self.path)?;
        self.findings = OnceCell::from(findings);
        Ok(())
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.path == other.path
    }
}
