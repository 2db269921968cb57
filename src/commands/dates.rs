//! Dates command - list, add and delete schedule milestones

use std::path::Path;

use sereto::config::OneOrMany;
use sereto::models::{Date, DateBound, DateRange, DateType, DateValue, SeretoDate};
use sereto::output::{DateInfo, ListResult, OperationResult, OutputMode, VersionListing};

use crate::cli::{DateAction, VersionArgs};

/// Handle date subcommands
pub fn dates_cmd(project: Option<&Path>, action: DateAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        DateAction::Show {
            versions,
            kind,
            start,
            end,
            inverse,
        } => {
            let kind = if kind.is_empty() { None } else { Some(OneOrMany::parse(&kind)?) };
            show(project, &versions, kind, (start.as_deref(), end.as_deref()), inverse, mode)
        },
        DateAction::Add {
            kind,
            date,
            until,
            at,
        } => {
            let kind: DateType = kind.parse()?;
            let start: SeretoDate = date.parse()?;
            let value = match until {
                Some(end) => DateValue::from(DateRange::new(start, end.parse()?)?),
                None => DateValue::from(start),
            };
            add(project, Date::new(kind, value), at.as_deref(), mode)
        },
        DateAction::Delete { index, at } => delete(project, index, at.as_deref(), mode),
    }
}

fn show(
    project: Option<&Path>,
    versions: &VersionArgs,
    kind: Option<OneOrMany<DateType>>,
    (start, end): (Option<&str>, Option<&str>),
    inverse: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = super::load_config(project)?;

    let mut listings = Vec::new();
    for version in super::selected_versions(&config, versions)? {
        let cfg = config.at_version(version)?;
        let shown = cfg.filter_dates(
            kind.clone(),
            start.map(DateBound::from),
            end.map(DateBound::from),
            inverse,
        )?;
        listings.push(VersionListing {
            version: version.to_string(),
            items: DateInfo::rows(cfg, &shown),
        });
    }

    ListResult {
        kind: "dates",
        versions: listings,
    }
    .render(mode);
    Ok(())
}

fn add(project: Option<&Path>, date: Date, at: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    config.at_version_mut(version)?.add_date(date);
    config.save()?;

    OperationResult::ok(format!("Added {} date {} to {version}", date.kind, date.date)).render(mode);
    Ok(())
}

fn delete(project: Option<&Path>, index: usize, at: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    config.at_version_mut(version)?.delete_date(index)?;
    config.save()?;

    OperationResult::ok(format!("Deleted date {index} from {version}")).render(mode);
    Ok(())
}
