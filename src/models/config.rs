//! Persisted configuration document (`config.json`)
//!
//! Loading runs three passes so that every rejection points at a location in
//! the document:
//!
//! 1. JSON Schema validation (`schema/config.schema.json`)
//! 2. Semantic checks the schema cannot express (date syntax and ordering,
//!    version keys that collide after normalization, duplicate target unames)
//! 3. Deserialization into the typed model

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SeretoError};
use crate::models::target::is_identifier;
use crate::models::{Date, DateRange, Person, ProjectVersion, SeretoDate, SeretoVersion, TargetModel};

/// JSON Schema of the configuration document
pub const CONFIG_SCHEMA: &str = include_str!("../../schema/config.schema.json");

/// One version of the project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConfigModel {
    /// Project ID (1-20 characters from `a-zA-Z0-9._-`)
    pub id: String,

    /// Project name
    pub name: String,

    /// Description of this version, e.g. "Initial" or "Retest"
    pub version_description: String,

    /// Assessed systems
    #[serde(default)]
    pub targets: Vec<TargetModel>,

    /// Schedule milestones
    #[serde(default)]
    pub dates: Vec<Date>,

    /// Stakeholders
    #[serde(default)]
    pub people: Vec<Person>,
}

impl VersionConfigModel {
    /// Create an empty version
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version_description: version_description.into(),
            targets: Vec::new(),
            dates: Vec::new(),
            people: Vec::new(),
        }
    }

    /// Check field constraints and unique target names.
    ///
    /// `pointer` is the JSON pointer of this version inside the document and
    /// prefixes the path of any reported error.
    pub fn validate(&self, pointer: &str) -> Result<()> {
        if !is_identifier(&self.id, 20) {
            return Err(SeretoError::validation(
                format!("{pointer}/id"),
                format!("'{}' is not a valid project id", self.id),
            ));
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (ix, target) in self.targets.iter().enumerate() {
            let target_pointer = format!("{pointer}/targets/{ix}");
            target
                .validate()
                .map_err(|e| SeretoError::validation(&target_pointer, e.to_string()))?;

            if let Some(first) = seen.insert(target.uname(), ix) {
                return Err(SeretoError::validation(
                    target_pointer,
                    format!("duplicate target uname '{}' (first at index {first})", target.uname()),
                ));
            }
        }
        Ok(())
    }
}

/// The full configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigModel {
    /// Version of the tool which wrote the document
    pub sereto_version: SeretoVersion,

    /// Configuration for each project version
    pub version_configs: BTreeMap<ProjectVersion, VersionConfigModel>,
}

impl ConfigModel {
    /// Load and validate a configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read(path).map_err(|e| {
            let action = match e.kind() {
                std::io::ErrorKind::NotFound => "file not found",
                std::io::ErrorKind::PermissionDenied => "permission denied",
                _ => "cannot read",
            };
            SeretoError::io(action, path, e)
        })?;
        Self::from_slice(&content)
    }

    /// Validate and parse a configuration document
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(content)
            .map_err(|e| SeretoError::validation("", format!("malformed JSON: {e}")))?;

        validate_schema(&document)?;
        validate_semantics(&document)?;

        let model: Self = serde_json::from_value(document)
            .map_err(|e| SeretoError::validation("", e.to_string()))?;

        for (version, config) in &model.version_configs {
            config.validate(&format!("/version_configs/{}", escape_pointer(&version.to_string())))?;
        }

        Ok(model)
    }

    /// Serialize to pretty JSON (2-space indent) terminated by a newline
    pub fn dump(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Run the JSON Schema pass, reporting the first violation
fn validate_schema(document: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(CONFIG_SCHEMA)?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| SeretoError::validation("", format!("invalid schema: {e}")))?;

    let first = validator.iter_errors(document).next();
    match first {
        Some(error) => Err(SeretoError::validation(error.instance_path.to_string(), error.to_string())),
        None => Ok(()),
    }
}

/// Checks that need parsing: version keys and date values
fn validate_semantics(document: &Value) -> Result<()> {
    let Some(versions) = document.get("version_configs").and_then(Value::as_object) else {
        return Ok(());
    };

    let mut seen: HashMap<ProjectVersion, &str> = HashMap::new();
    for (key, config) in versions {
        let pointer = format!("/version_configs/{}", escape_pointer(key));

        let version: ProjectVersion =
            key.parse().map_err(|e: SeretoError| SeretoError::validation(&pointer, e.to_string()))?;
        if let Some(other) = seen.insert(version, key) {
            return Err(SeretoError::validation(
                pointer,
                format!("version '{key}' duplicates '{other}'"),
            ));
        }

        let dates = config.get("dates").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
        for (ix, date) in dates.iter().enumerate() {
            let date_pointer = format!("{pointer}/dates/{ix}/date");
            if let Some(value) = date.get("date") {
                check_date_value(value)
                    .map_err(|e| SeretoError::validation(&date_pointer, e.to_string()))?;
            }
        }
    }
    Ok(())
}

fn check_date_value(value: &Value) -> Result<()> {
    match value {
        Value::String(s) => s.parse::<SeretoDate>().map(|_| ()),
        Value::Object(range) => {
            let parse = |key: &str| -> Result<SeretoDate> {
                range
                    .get(key)
                    .and_then(Value::as_str)
                    .ok_or_else(|| SeretoError::parse("date range", format!("missing '{key}'")))?
                    .parse()
            };
            DateRange::new(parse("start")?, parse("end")?).map(|_| ())
        },
        _ => Err(SeretoError::parse("date", "expected a string or a {start, end} object")),
    }
}

/// Escape a key for use as a JSON pointer segment (RFC 6901)
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
