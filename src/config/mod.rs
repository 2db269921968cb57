//! Versioned project configuration
//!
//! A [`Config`] maps every [`ProjectVersion`] of a project to its
//! [`VersionConfig`] and knows where it was loaded from. It is persisted as
//! `config.json` in the project directory (see [`crate::paths`]).

pub mod filter;
mod version_config;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

pub use filter::OneOrMany;
pub use version_config::{PersonFilter, TargetSelector, VersionConfig};

use crate::error::{Result, SeretoError};
use crate::findings::FindingsConfig;
use crate::models::{ConfigModel, ProjectVersion, SeretoVersion, VersionConfigModel};
use crate::paths;

/// Version argument given either parsed or as a string to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionQuery<'a> {
    /// Already parsed
    Version(ProjectVersion),
    /// Parsed on use
    Text(&'a str),
}

impl VersionQuery<'_> {
    /// Resolve to a version
    pub fn resolve(self) -> Result<ProjectVersion> {
        match self {
            Self::Version(v) => Ok(v),
            Self::Text(s) => s.parse(),
        }
    }
}

impl From<ProjectVersion> for VersionQuery<'_> {
    fn from(version: ProjectVersion) -> Self {
        Self::Version(version)
    }
}

impl<'a> From<&'a str> for VersionQuery<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for VersionQuery<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s)
    }
}

/// Project configuration across all versions
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Version of the tool which wrote the configuration
    pub sereto_version: SeretoVersion,
    version_configs: BTreeMap<ProjectVersion, VersionConfig>,
    path: PathBuf,
}

impl Config {
    /// Create an empty configuration to be saved at `path`
    #[must_use]
    pub fn new(sereto_version: SeretoVersion, path: impl Into<PathBuf>) -> Self {
        Self {
            sereto_version,
            version_configs: BTreeMap::new(),
            path: path.into(),
        }
    }

    /// Create `config.json` for a new project with an initial `v1.0`
    ///
    /// Fails if the project directory already holds a configuration.
    pub fn init(project_dir: &Path, id: &str, name: &str) -> Result<Self> {
        let path = paths::config_file(project_dir);
        if path.exists() {
            return Err(SeretoError::io(
                "configuration already exists",
                &path,
                io::Error::from(ErrorKind::AlreadyExists),
            ));
        }
        fs::create_dir_all(project_dir)
            .map_err(|e| SeretoError::io("cannot create directory", project_dir, e))?;

        let mut config = Self::new(SeretoVersion::current(), path);
        config.add_version_config(
            ProjectVersion::default(),
            VersionConfigModel::new(id, name, "Initial"),
        )?;
        config.save()?;

        log::info!("created project '{id}' at {}", project_dir.display());
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// Targets are bound to directories next to the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let model = ConfigModel::load_from(path)?;
        let project_path = parent_dir(path);

        let version_configs = model
            .version_configs
            .into_iter()
            .map(|(version, cfg)| (version, VersionConfig::from_model(cfg, version, &project_path)))
            .collect();

        Ok(Self {
            sereto_version: model.sereto_version,
            version_configs,
            path: path.to_path_buf(),
        })
    }

    /// Convert to the persisted model
    #[must_use]
    pub fn to_model(&self) -> ConfigModel {
        ConfigModel {
            sereto_version: self.sereto_version.clone(),
            version_configs: self
                .version_configs
                .iter()
                .map(|(version, cfg)| (*version, cfg.to_model()))
                .collect(),
        }
    }

    /// Write the configuration back to its file.
    ///
    /// Content goes to a sibling temporary file first, which then replaces the
    /// original.
    pub fn save(&self) -> Result<()> {
        let content = self.to_model().dump()?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, content).map_err(|e| SeretoError::io("cannot write", &tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            SeretoError::io("cannot replace", &self.path, e)
        })?;

        log::info!("saved config to {}", self.path.display());
        Ok(())
    }

    /// Path of the configuration file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project directory (parent of the configuration file)
    #[must_use]
    pub fn project_path(&self) -> PathBuf {
        parent_dir(&self.path)
    }

    // === Versions ===

    /// All versions in ascending order
    #[must_use]
    pub fn versions(&self) -> Vec<ProjectVersion> {
        self.version_configs.keys().copied().collect()
    }

    /// Configuration at a version
    pub fn at_version<'a>(&self, version: impl Into<VersionQuery<'a>>) -> Result<&VersionConfig> {
        let version = version.into().resolve()?;
        self.version_configs.get(&version).ok_or(SeretoError::UnknownVersion(version))
    }

    /// Mutable configuration at a version
    pub fn at_version_mut<'a>(
        &mut self,
        version: impl Into<VersionQuery<'a>>,
    ) -> Result<&mut VersionConfig> {
        let version = version.into().resolve()?;
        self.version_configs.get_mut(&version).ok_or(SeretoError::UnknownVersion(version))
    }

    /// Earliest version
    pub fn first_version(&self) -> Result<ProjectVersion> {
        self.version_configs.keys().next().copied().ok_or(SeretoError::EmptyConfig)
    }

    /// Latest version
    pub fn last_version(&self) -> Result<ProjectVersion> {
        self.version_configs.keys().next_back().copied().ok_or(SeretoError::EmptyConfig)
    }

    /// Configuration of the earliest version
    pub fn first_config(&self) -> Result<&VersionConfig> {
        self.version_configs.values().next().ok_or(SeretoError::EmptyConfig)
    }

    /// Mutable configuration of the earliest version
    pub fn first_config_mut(&mut self) -> Result<&mut VersionConfig> {
        self.version_configs.values_mut().next().ok_or(SeretoError::EmptyConfig)
    }

    /// Configuration of the latest version
    pub fn last_config(&self) -> Result<&VersionConfig> {
        self.version_configs.values().next_back().ok_or(SeretoError::EmptyConfig)
    }

    /// Mutable configuration of the latest version
    pub fn last_config_mut(&mut self) -> Result<&mut VersionConfig> {
        self.version_configs.values_mut().next_back().ok_or(SeretoError::EmptyConfig)
    }

    /// Iterate over all versions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectVersion, &VersionConfig)> {
        self.version_configs.iter()
    }

    /// Add a new version built from `model`.
    ///
    /// The model is validated first; an existing version is never replaced.
    pub fn add_version_config(
        &mut self,
        version: ProjectVersion,
        model: VersionConfigModel,
    ) -> Result<&mut Self> {
        if self.version_configs.contains_key(&version) {
            return Err(SeretoError::DuplicateVersion(version));
        }
        model.validate(&format!("/version_configs/{version}"))?;

        let cfg = VersionConfig::from_model(model, version, &self.project_path());
        self.version_configs.insert(version, cfg);
        log::debug!("added version {version}");
        Ok(self)
    }

    /// Start a retest: copy the latest version into the next major version.
    ///
    /// Each finding rated at the previous version keeps its rating at the new
    /// version unless one is already set. All findings files are read before
    /// anything changes, so a failed read leaves the configuration and the
    /// files untouched. Returns the new version.
    pub fn add_retest(&mut self) -> Result<ProjectVersion> {
        let last = self.last_config()?;
        let previous = last.version;
        let retest = previous.next_major()?;

        let mut model = last.to_model();
        model.version_description = "Retest".to_string();

        let mut updates = Vec::new();
        for target in last.targets() {
            let dir = target.path().to_path_buf();
            let mut findings = FindingsConfig::load(&dir)?;
            if carry_risks(&mut findings, previous, retest) {
                updates.push((dir, findings));
            }
        }

        self.add_version_config(retest, model)?;

        for (dir, findings) in &updates {
            if let Err(e) = findings.save(dir) {
                self.version_configs.remove(&retest);
                return Err(e);
            }
        }

        log::info!("added retest version {retest}");
        Ok(retest)
    }
}

/// Copy ratings from `from` to `to` where `to` has none; true if anything changed
fn carry_risks(findings: &mut FindingsConfig, from: ProjectVersion, to: ProjectVersion) -> bool {
    let mut changed = false;
    for finding in &mut findings.findings {
        let Some(risk) = finding.risks.get(&from).copied() else {
            continue;
        };
        if let Entry::Vacant(slot) = finding.risks.entry(to) {
            slot.insert(risk);
            changed = true;
        }
    }
    changed
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
