//! Configuration of a single project version
//!
//! Holds the ordered lists of targets, dates and people of one version and
//! provides filtering, selection and mutation over them. Indices exposed to
//! callers are 1-based, matching what `show` commands print.

use std::path::Path;

use serde_json::{Value, json};

use super::filter::{self, OneOrMany};
use crate::error::{Result, SeretoError, to_position};
use crate::models::{
    Date, DateBound, DateType, Person, PersonType, ProjectVersion, TargetModel, VersionConfigModel,
};
use crate::target::Target;

/// How to pick a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// 1-based position in the target list
    Index(usize),
    /// Category name or unique name; a string of digits is treated as an index
    Name(String),
}

impl From<usize> for TargetSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for TargetSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TargetSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Criteria for [`VersionConfig::filter_people`]
///
/// Text criteria are regular expressions searched anywhere in the field.
#[derive(Debug, Clone, Default)]
pub struct PersonFilter<'a> {
    /// Accepted person types
    pub kind: Option<OneOrMany<PersonType>>,
    /// Pattern for the name
    pub name: Option<&'a str>,
    /// Pattern for the business unit
    pub business_unit: Option<&'a str>,
    /// Pattern for the email
    pub email: Option<&'a str>,
    /// Pattern for the role
    pub role: Option<&'a str>,
}

/// Configuration of one project version
#[derive(Debug, Clone, PartialEq)]
pub struct VersionConfig {
    /// Version this configuration belongs to
    pub version: ProjectVersion,
    /// Project ID
    pub id: String,
    /// Project name
    pub name: String,
    /// Description of the version, e.g. "Initial" or "Retest"
    pub version_description: String,
    targets: Vec<Target>,
    dates: Vec<Date>,
    people: Vec<Person>,
}

impl VersionConfig {
    /// Build from the persisted model, binding targets to `project_path/<uname>`
    #[must_use]
    pub fn from_model(model: VersionConfigModel, version: ProjectVersion, project_path: &Path) -> Self {
        Self {
            version,
            id: model.id,
            name: model.name,
            version_description: model.version_description,
            targets: model
                .targets
                .into_iter()
                .map(|data| Target::in_project(data, project_path))
                .collect(),
            dates: model.dates,
            people: model.people,
        }
    }

    /// Convert to the persisted model
    #[must_use]
    pub fn to_model(&self) -> VersionConfigModel {
        VersionConfigModel {
            id: self.id.clone(),
            name: self.name.clone(),
            version_description: self.version_description.clone(),
            targets: self.targets.iter().map(|t| t.data().clone()).collect(),
            dates: self.dates.clone(),
            people: self.people.clone(),
        }
    }

    /// Targets in display order
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Dates in display order
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// People in display order
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    // === Filtering ===

    /// Filter targets by category and a name pattern.
    ///
    /// `name` is a regular expression searched anywhere in the target name.
    /// With `inverse`, returns every target the criteria reject.
    pub fn filter_targets(
        &self,
        category: Option<OneOrMany<String>>,
        name: Option<&str>,
        inverse: bool,
    ) -> Result<Vec<&TargetModel>> {
        let name = filter::compile(name)?;

        let split = filter::partition(&self.targets, |t| {
            let data = t.data();
            category.as_ref().is_none_or(|c| c.contains(&data.category))
                && filter::search(name.as_ref(), Some(&data.name))
        });

        Ok(split.pick(inverse).into_iter().map(Target::data).collect())
    }

    /// Filter dates by type and inclusive bounds.
    ///
    /// A single date matches when it lies within `[start, end]`. A range
    /// matches only when it is fully contained: `range.start >= start` and
    /// `range.end <= end`. Ranges that merely overlap the bounds are rejected.
    pub fn filter_dates(
        &self,
        kind: Option<OneOrMany<DateType>>,
        start: Option<DateBound<'_>>,
        end: Option<DateBound<'_>>,
        inverse: bool,
    ) -> Result<Vec<&Date>> {
        let start = start.map(DateBound::resolve).transpose()?;
        let end = end.map(DateBound::resolve).transpose()?;

        let split = filter::partition(&self.dates, |d| {
            kind.as_ref().is_none_or(|k| k.contains(&d.kind)) && d.date.within(start, end)
        });

        Ok(split.pick(inverse))
    }

    /// Filter people by type and patterns on their optional fields.
    ///
    /// A person whose field is unset never matches a pattern for that field.
    pub fn filter_people(&self, criteria: &PersonFilter<'_>, inverse: bool) -> Result<Vec<&Person>> {
        let name = filter::compile(criteria.name)?;
        let business_unit = filter::compile(criteria.business_unit)?;
        let email = filter::compile(criteria.email)?;
        let role = filter::compile(criteria.role)?;

        let split = filter::partition(&self.people, |p| {
            criteria.kind.as_ref().is_none_or(|k| k.contains(&p.kind))
                && filter::search(name.as_ref(), p.name.as_deref())
                && filter::search(business_unit.as_ref(), p.business_unit.as_deref())
                && filter::search(email.as_ref(), p.email.as_deref())
                && filter::search(role.as_ref(), p.role.as_deref())
        });

        Ok(split.pick(inverse))
    }

    // === Selection ===

    /// Resolve exactly one target.
    ///
    /// Precedence:
    /// 1. no selector: the only target, if there is exactly one
    /// 2. an index, or a string of digits: 1-based position
    /// 3. one of `categories` (case-insensitive): the single target of that category
    /// 4. anything else: the target with that unique name
    pub fn select_target<I>(
        &self,
        project_path: &Path,
        categories: I,
        selector: Option<TargetSelector>,
    ) -> Result<Target>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let bind = |data: &TargetModel| Target::in_project(data.clone(), project_path);

        let Some(selector) = selector else {
            return match self.targets.as_slice() {
                [only] => Ok(bind(only.data())),
                targets => Err(SeretoError::Selection(format!(
                    "no selector provided and there are {} targets present",
                    targets.len()
                ))),
            };
        };

        let name = match selector {
            TargetSelector::Index(index) => return self.target_at(index).map(|t| bind(t.data())),
            TargetSelector::Name(name) if is_index(&name) => {
                let index = name.parse().unwrap_or(usize::MAX);
                return self.target_at(index).map(|t| bind(t.data()));
            },
            TargetSelector::Name(name) => name,
        };

        let lowered = name.to_lowercase();
        if categories.into_iter().any(|c| c.as_ref().to_lowercase() == lowered) {
            let in_category: Vec<&Target> = self
                .targets
                .iter()
                .filter(|t| t.data().category.to_lowercase() == lowered)
                .collect();
            return match in_category.as_slice() {
                [] => Err(SeretoError::Selection(format!(
                    "category '{name}' does not contain any target"
                ))),
                [only] => Ok(bind(only.data())),
                _ => Err(SeretoError::Selection(format!(
                    "category '{name}' contains multiple targets, use uname when querying"
                ))),
            };
        }

        let by_uname: Vec<&Target> = self.targets.iter().filter(|t| t.uname() == name).collect();
        match by_uname.as_slice() {
            [only] => {
                log::debug!("selected target {name} by uname");
                Ok(bind(only.data()))
            },
            _ => Err(SeretoError::Selection(format!("target with uname '{name}' not found"))),
        }
    }

    fn target_at(&self, index: usize) -> Result<&Target> {
        let position = to_position(index, self.targets.len())?;
        Ok(&self.targets[position])
    }

    // === Mutation ===

    /// Append a target; its unique name must not be taken yet
    pub fn add_target(&mut self, target: Target) -> Result<&mut Self> {
        target.data().validate()?;
        let uname = target.uname();
        if self.targets.iter().any(|t| t.uname() == uname) {
            return Err(SeretoError::DuplicateTarget(uname));
        }
        self.targets.push(target);
        Ok(self)
    }

    /// Delete the target at a 1-based index
    pub fn delete_target(&mut self, index: usize) -> Result<&mut Self> {
        let position = to_position(index, self.targets.len())?;
        self.targets.remove(position);
        Ok(self)
    }

    /// Append a date
    pub fn add_date(&mut self, date: Date) -> &mut Self {
        self.dates.push(date);
        self
    }

    /// Delete the date at a 1-based index
    pub fn delete_date(&mut self, index: usize) -> Result<&mut Self> {
        let position = to_position(index, self.dates.len())?;
        self.dates.remove(position);
        Ok(self)
    }

    /// Append a person
    pub fn add_person(&mut self, person: Person) -> &mut Self {
        self.people.push(person);
        self
    }

    /// Delete the person at a 1-based index
    pub fn delete_person(&mut self, index: usize) -> Result<&mut Self> {
        let position = to_position(index, self.people.len())?;
        self.people.remove(position);
        Ok(self)
    }

    // === Rendering ===

    /// Shallow variable mapping for template renderers
    #[must_use]
    pub fn template_vars(&self) -> Value {
        json!({
            "version": self.version.to_string(),
            "id": self.id,
            "name": self.name,
            "version_description": self.version_description,
            "targets": self.targets.iter().map(Target::data).collect::<Vec<_>>(),
            "dates": self.dates,
            "people": self.people,
        })
    }
}

/// Non-empty and ASCII digits only
fn is_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
