//! Command implementations

mod config;
mod dates;
mod new;
mod people;
mod retest;
mod targets;

use std::path::{Path, PathBuf};

use anyhow::Context;
use sereto::Config;
use sereto::models::ProjectVersion;
use sereto::paths;

use crate::cli::VersionArgs;

pub use config::config_cmd;
pub use new::new_project;
pub use retest::retest;

/// Directory of the project a command operates on.
///
/// `--project` wins; otherwise the nearest ancestor of the current directory
/// holding a `config.json`, falling back to the current directory itself.
fn project_dir(project: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = project {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(paths::find_project_root(&cwd).unwrap_or(cwd))
}

/// Load the configuration of the project
fn load_config(project: Option<&Path>) -> anyhow::Result<Config> {
    let dir = project_dir(project)?;
    let config = Config::load_from(&paths::config_file(&dir))?;
    Ok(config)
}

/// Versions chosen by `--at` / `--all`, the latest one when neither is given
fn selected_versions(config: &Config, args: &VersionArgs) -> anyhow::Result<Vec<ProjectVersion>> {
    if args.all {
        return Ok(config.versions());
    }
    Ok(vec![edited_version(config, args.at.as_deref())?])
}

/// Version a mutating command works on, the latest one by default
fn edited_version(config: &Config, at: Option<&str>) -> anyhow::Result<ProjectVersion> {
    let version = match at {
        Some(at) => config.at_version(at)?.version,
        None => config.last_version()?,
    };
    Ok(version)
}
