//! sereto - Versioned project configuration for security assessment reports
//!
//! This library tracks the targets, dates and people of a project across its
//! versions, with filtering, selection and JSON persistence.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod findings;
pub mod models;
pub mod output;
pub mod paths;
pub mod settings;
pub mod target;

pub use config::{Config, VersionConfig};
pub use error::{Result, SeretoError};
