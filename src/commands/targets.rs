//! Targets command - list, add, delete and select targets

use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use sereto::config::{OneOrMany, TargetSelector};
use sereto::models::TargetModel;
use sereto::output::{
    ListResult, OperationResult, OutputMode, TargetInfo, TargetSelectResult, VersionListing,
};
use sereto::settings::Settings;
use sereto::target::Target;

use crate::cli::{TargetAction, VersionArgs};

/// Handle target subcommands
pub fn targets_cmd(project: Option<&Path>, action: TargetAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        TargetAction::Show {
            versions,
            category,
            name,
            inverse,
        } => show(project, &versions, category, name.as_deref(), inverse, mode),
        TargetAction::Add {
            category,
            name,
            fields,
            at,
        } => add(project, &category, &name, &fields, at.as_deref(), mode),
        TargetAction::Delete { index, at } => delete(project, index, at.as_deref(), mode),
        TargetAction::Select { selector, at } => select(project, selector, at.as_deref(), mode),
    }
}

fn show(
    project: Option<&Path>,
    versions: &VersionArgs,
    category: Vec<String>,
    name: Option<&str>,
    inverse: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = super::load_config(project)?;
    let category = (!category.is_empty()).then_some(OneOrMany::Many(category));

    let mut listings = Vec::new();
    for version in super::selected_versions(&config, versions)? {
        let cfg = config.at_version(version)?;
        let shown = cfg.filter_targets(category.clone(), name, inverse)?;
        listings.push(VersionListing {
            version: version.to_string(),
            items: TargetInfo::rows(cfg, &shown),
        });
    }

    ListResult {
        kind: "targets",
        versions: listings,
    }
    .render(mode);
    Ok(())
}

fn add(
    project: Option<&Path>,
    category: &str,
    name: &str,
    fields: &[String],
    at: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    let mut data = TargetModel::new(category, name);
    for field in fields {
        let (key, value) = parse_field(field)?;
        data = data.with_field(key, value);
    }

    if !Settings::load().is_category(category) {
        log::warn!("'{category}' is not a known category, selecting by category will not work");
    }

    let target = Target::in_project(data, &config.project_path());
    let uname = target.uname();
    config.at_version_mut(version)?.add_target(target)?;
    config.save()?;

    OperationResult::ok(format!("Added target {uname} to {version}")).render(mode);
    Ok(())
}

fn delete(project: Option<&Path>, index: usize, at: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    let cfg = config.at_version_mut(version)?;
    let removed = index.checked_sub(1).and_then(|ix| cfg.targets().get(ix)).map(Target::uname);
    cfg.delete_target(index)?;
    config.save()?;

    let removed = removed.unwrap_or_else(|| index.to_string());
    OperationResult::ok(format!("Deleted target {removed} from {version}")).render(mode);
    Ok(())
}

fn select(
    project: Option<&Path>,
    selector: Option<String>,
    at: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;
    let settings = Settings::load();

    let target = config.at_version(version)?.select_target(
        &config.project_path(),
        &settings.categories,
        selector.map(TargetSelector::from),
    )?;
    let risks = target.findings_config()?.risk_counts(version);

    TargetSelectResult {
        version: version.to_string(),
        uname: target.uname(),
        category: target.data().category.clone(),
        name: target.data().name.clone(),
        path: target.path().display().to_string(),
        risks,
    }
    .render(mode);
    Ok(())
}

/// Split a `key=value` argument.
///
/// Values that are valid JSON (numbers, booleans, arrays) keep their type,
/// anything else is stored as a string.
fn parse_field(field: &str) -> anyhow::Result<(&str, Value)> {
    let (key, raw) = field
        .split_once('=')
        .with_context(|| format!("invalid field '{field}' (expected key=value)"))?;
    let key = key.trim();
    if key.is_empty() || key == "category" || key == "name" {
        anyhow::bail!("invalid field name '{key}'");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key, value))
}
