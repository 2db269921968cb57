//! Create a new project

use std::path::Path;

use anyhow::Context;
use sereto::Config;
use sereto::output::{OperationResult, OutputMode};

/// Create `config.json` with an initial `v1.0` in the project directory
pub fn new_project(
    project: Option<&Path>,
    id: &str,
    name: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let dir = match project {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let config = Config::init(&dir, id, name)?;
    let version = config.last_version()?;

    OperationResult::ok(format!(
        "Created project {id} ({name}) at {} with version {version}",
        dir.display()
    ))
    .render(mode);
    Ok(())
}
