//! Config command - inspect the versioned configuration

use std::path::Path;

use sereto::output::{ConfigShowResult, OutputMode, VersionSummary};

use crate::cli::{ConfigAction, VersionArgs};

/// Handle config subcommands
pub fn config_cmd(project: Option<&Path>, action: ConfigAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show { versions } => show(project, &versions, mode),
        ConfigAction::Versions => show(
            project,
            &VersionArgs {
                at: None,
                all: true,
            },
            mode,
        ),
        ConfigAction::Targets { action } => super::targets::targets_cmd(project, action, mode),
        ConfigAction::Dates { action } => super::dates::dates_cmd(project, action, mode),
        ConfigAction::People { action } => super::people::people_cmd(project, action, mode),
    }
}

fn show(project: Option<&Path>, args: &VersionArgs, mode: OutputMode) -> anyhow::Result<()> {
    let config = super::load_config(project)?;

    let versions = super::selected_versions(&config, args)?
        .into_iter()
        .map(|version| Ok(VersionSummary::of(version, config.at_version(version)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    ConfigShowResult {
        sereto_version: config.sereto_version.to_string(),
        versions,
    }
    .render(mode);
    Ok(())
}
