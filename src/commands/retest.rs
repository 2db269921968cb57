//! Start a retest of the project

use std::path::Path;

use sereto::output::{OperationResult, OutputMode};

/// Copy the latest version into the next major version and save
pub fn retest(project: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let previous = config.last_version()?;
    let version = config.add_retest()?;
    config.save()?;

    OperationResult::ok(format!("Added retest version {version} (copy of {previous})")).render(mode);
    Ok(())
}
