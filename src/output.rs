//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::config::VersionConfig;
use crate::findings::RiskCounts;
use crate::models::{Date, Person, ProjectVersion, TargetModel};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A target row
#[derive(Debug, Serialize)]
pub struct TargetInfo {
    /// 1-based position in the version's target list
    pub index: usize,
    /// Unique name
    pub uname: String,
    /// Category
    pub category: String,
    /// Display name
    pub name: String,
}

/// A date row
#[derive(Debug, Serialize)]
pub struct DateInfo {
    /// 1-based position in the version's date list
    pub index: usize,
    /// Milestone kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Formatted date or range
    pub date: String,
}

/// A person row
#[derive(Debug, Serialize)]
pub struct PersonInfo {
    /// 1-based position in the version's people list
    pub index: usize,
    /// Person type
    #[serde(rename = "type")]
    pub kind: String,
    /// Name
    pub name: Option<String>,
    /// Business unit
    pub business_unit: Option<String>,
    /// Email
    pub email: Option<String>,
    /// Role
    pub role: Option<String>,
}

/// Filtered lists of one version
#[derive(Debug, Serialize)]
pub struct VersionListing<T> {
    /// Version the rows belong to
    pub version: String,
    /// Rows in display order
    pub items: Vec<T>,
}

/// Result of a `targets show` / `dates show` / `people show` command
#[derive(Debug, Serialize)]
pub struct ListResult<T> {
    /// What is listed ("targets", "dates", "people")
    pub kind: &'static str,
    /// One listing per requested version
    pub versions: Vec<VersionListing<T>>,
}

/// Summary of one version
#[derive(Debug, Serialize)]
pub struct VersionSummary {
    /// Version
    pub version: String,
    /// Project ID
    pub id: String,
    /// Project name
    pub name: String,
    /// Version description
    pub version_description: String,
    /// Number of targets
    pub targets: usize,
    /// Number of dates
    pub dates: usize,
    /// Number of people
    pub people: usize,
}

/// Result of `config show` and `config versions`
#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    /// Tool version recorded in the document
    pub sereto_version: String,
    /// Requested versions in ascending order
    pub versions: Vec<VersionSummary>,
}

/// Result of `targets select`
#[derive(Debug, Serialize)]
pub struct TargetSelectResult {
    /// Version the target was selected from
    pub version: String,
    /// Unique name
    pub uname: String,
    /// Category
    pub category: String,
    /// Display name
    pub name: String,
    /// Directory holding the target's files
    pub path: String,
    /// Findings per risk level at `version`
    pub risks: RiskCounts,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

/// Rows rendered as a single line in human mode
pub trait HumanRow {
    /// Render the row
    fn human(&self) -> String;
}

impl TargetInfo {
    /// Build rows for a list of targets, numbering from the position in the
    /// full list of the version
    #[must_use]
    pub fn rows(cfg: &VersionConfig, shown: &[&TargetModel]) -> Vec<Self> {
        cfg.targets()
            .iter()
            .enumerate()
            .filter(|(_, t)| shown.iter().any(|s| *s == t.data()))
            .map(|(ix, t)| Self {
                index: ix + 1,
                uname: t.uname(),
                category: t.data().category.clone(),
                name: t.data().name.clone(),
            })
            .collect()
    }
}

impl HumanRow for TargetInfo {
    fn human(&self) -> String {
        format!("{:>3}  {:<16} {:<24} {}", self.index, self.category, self.name, self.uname)
    }
}

impl DateInfo {
    /// Build rows for a list of dates
    #[must_use]
    pub fn rows(cfg: &VersionConfig, shown: &[&Date]) -> Vec<Self> {
        numbered(cfg.dates(), shown)
            .map(|(index, d)| Self {
                index,
                kind: d.kind.to_string(),
                date: d.date.to_string(),
            })
            .collect()
    }
}

impl HumanRow for DateInfo {
    fn human(&self) -> String {
        format!("{:>3}  {:<16} {}", self.index, self.kind, self.date)
    }
}

impl PersonInfo {
    /// Build rows for a list of people
    #[must_use]
    pub fn rows(cfg: &VersionConfig, shown: &[&Person]) -> Vec<Self> {
        numbered(cfg.people(), shown)
            .map(|(index, p)| Self {
                index,
                kind: p.kind.to_string(),
                name: p.name.clone(),
                business_unit: p.business_unit.clone(),
                email: p.email.clone(),
                role: p.role.clone(),
            })
            .collect()
    }
}

impl HumanRow for PersonInfo {
    fn human(&self) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "{:>3}  {:<18} {:<20} {:<16} {:<28} {}",
            self.index,
            self.kind,
            field(&self.name),
            field(&self.business_unit),
            field(&self.email),
            field(&self.role)
        )
    }
}

/// Pair each shown element with its 1-based position in `all`.
///
/// Elements are compared by address, so equal duplicates keep their own index.
fn numbered<'a, T>(all: &'a [T], shown: &[&T]) -> impl Iterator<Item = (usize, &'a T)> {
    let shown: Vec<*const T> = shown.iter().map(|s| std::ptr::from_ref::<T>(s)).collect();
    all.iter()
        .enumerate()
        .filter(move |(_, item)| shown.contains(&std::ptr::from_ref::<T>(item)))
        .map(|(ix, item)| (ix + 1, item))
}

impl<T: Serialize + HumanRow> ListResult<T> {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for listing in &self.versions {
            println!("{} ({}):", self.kind, listing.version);
            if listing.items.is_empty() {
                println!("  (none)");
            }
            for row in &listing.items {
                println!("{}", row.human());
            }
            println!();
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl VersionSummary {
    /// Summarize a version
    #[must_use]
    pub fn of(version: ProjectVersion, cfg: &VersionConfig) -> Self {
        Self {
            version: version.to_string(),
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            version_description: cfg.version_description.clone(),
            targets: cfg.targets().len(),
            dates: cfg.dates().len(),
            people: cfg.people().len(),
        }
    }
}

impl ConfigShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("sereto version: {}\n", self.sereto_version);
        for v in &self.versions {
            println!("{} - {} ({})", v.version, v.name, v.version_description);
            println!("  ID:      {}", v.id);
            println!("  Targets: {}", v.targets);
            println!("  Dates:   {}", v.dates);
            println!("  People:  {}\n", v.people);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl TargetSelectResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("{} ({})", self.uname, self.version);
                println!("  Category: {}", self.category);
                println!("  Name:     {}", self.name);
                println!("  Path:     {}", self.path);
                println!(
                    "  Findings: {} (critical {}, high {}, medium {}, low {}, info {})",
                    self.risks.total(),
                    self.risks.critical,
                    self.risks.high,
                    self.risks.medium,
                    self.risks.low,
                    self.risks.info
                );
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl OperationResult {
    /// Successful operation with a message
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
