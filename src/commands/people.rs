//! People command - list, add and delete stakeholders

use std::path::Path;

use sereto::config::{OneOrMany, PersonFilter};
use sereto::models::{Person, PersonType};
use sereto::output::{ListResult, OperationResult, OutputMode, PersonInfo, VersionListing};

use crate::cli::{PersonAction, VersionArgs};

/// Handle person subcommands
pub fn people_cmd(project: Option<&Path>, action: PersonAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        PersonAction::Show {
            versions,
            kind,
            name,
            business_unit,
            email,
            role,
            inverse,
        } => {
            let criteria = PersonFilter {
                kind: if kind.is_empty() { None } else { Some(OneOrMany::parse(&kind)?) },
                name: name.as_deref(),
                business_unit: business_unit.as_deref(),
                email: email.as_deref(),
                role: role.as_deref(),
            };
            show(project, &versions, &criteria, inverse, mode)
        },
        PersonAction::Add {
            kind,
            name,
            business_unit,
            email,
            role,
            at,
        } => {
            let kind: PersonType = kind.parse()?;
            let person = Person {
                kind,
                name,
                business_unit,
                email,
                role,
            };
            add(project, person, at.as_deref(), mode)
        },
        PersonAction::Delete { index, at } => delete(project, index, at.as_deref(), mode),
    }
}

fn show(
    project: Option<&Path>,
    versions: &VersionArgs,
    criteria: &PersonFilter<'_>,
    inverse: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = super::load_config(project)?;

    let mut listings = Vec::new();
    for version in super::selected_versions(&config, versions)? {
        let cfg = config.at_version(version)?;
        let shown = cfg.filter_people(criteria, inverse)?;
        listings.push(VersionListing {
            version: version.to_string(),
            items: PersonInfo::rows(cfg, &shown),
        });
    }

    ListResult {
        kind: "people",
        versions: listings,
    }
    .render(mode);
    Ok(())
}

fn add(project: Option<&Path>, person: Person, at: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    let label = person.name.clone().unwrap_or_else(|| person.kind.to_string());
    config.at_version_mut(version)?.add_person(person);
    config.save()?;

    OperationResult::ok(format!("Added person {label} to {version}")).render(mode);
    Ok(())
}

fn delete(project: Option<&Path>, index: usize, at: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = super::load_config(project)?;
    let version = super::edited_version(&config, at)?;

    config.at_version_mut(version)?.delete_person(index)?;
    config.save()?;

    OperationResult::ok(format!("Deleted person {index} from {version}")).render(mode);
    Ok(())
}
