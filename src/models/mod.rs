//! Data models for sereto
//!
//! Value types stored in a project configuration:
//! - Target: an assessed system ("what is tested")
//! - Date: a schedule milestone ("when")
//! - Person: a stakeholder ("who")
//! - `ProjectVersion` / `SeretoVersion`: version identifiers
//!
//! `config` holds the persisted document built from these values.

pub mod config;
pub mod date;
pub mod person;
pub mod target;
pub mod version;

pub use config::{ConfigModel, VersionConfigModel};
pub use date::{Date, DateBound, DateRange, DateType, DateValue, SeretoDate};
pub use person::{Person, PersonType};
pub use target::TargetModel;
pub use version::{ProjectVersion, SeretoVersion};
