//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing sereto components.

use std::fs;
use std::path::{Path, PathBuf};

use sereto::Config;
use sereto::paths;
use tempfile::TempDir;

/// A project with three targets, four dates and three people at `v1.0`
pub const SAMPLE_CONFIG: &str = r#"{
  "sereto_version": "0.4.2",
  "version_configs": {
    "v1.0": {
      "id": "PT01234",
      "name": "Customer Portal Assessment",
      "version_description": "Initial",
      "targets": [
        { "category": "dast", "name": "Customer Portal", "url": "https://portal.example.com" },
        { "category": "sast", "name": "Portal Backend" },
        { "category": "dast", "name": "Admin Console" }
      ],
      "dates": [
        { "type": "sow_sent", "date": "02-Jan-2024" },
        { "type": "meeting", "date": { "start": "05-Jan-2024", "end": "10-Jan-2024" } },
        { "type": "meeting", "date": { "start": "20-Jan-2024", "end": "05-Feb-2024" } },
        { "type": "report_sent", "date": "12-Feb-2024" }
      ],
      "people": [
        {
          "type": "requester",
          "name": "Alice Novak",
          "business_unit": "Digital Channels",
          "email": "alice.novak@example.com"
        },
        {
          "type": "author",
          "name": "Bob Smith",
          "email": "bob.smith@example.com",
          "role": "Penetration Tester"
        },
        { "type": "reviewer", "name": "Carol White" }
      ]
    }
  }
}
"#;

/// A project directory in a temporary location
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a project holding [`SAMPLE_CONFIG`]
    pub fn new() -> Self {
        let project = Self::empty();
        project.write_config(SAMPLE_CONFIG);
        project
    }

    /// Create a directory without any configuration
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Get the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> PathBuf {
        paths::config_file(self.dir.path())
    }

    /// Overwrite the configuration file
    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).unwrap();
    }

    /// Write a file relative to the project directory
    pub fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Load the configuration, panicking on errors
    pub fn load(&self) -> Config {
        Config::load_from(&self.config_path()).expect("sample config should load")
    }
}

/// Replace `from` with `to` in the sample configuration
pub fn sample_with(from: &str, to: &str) -> String {
    assert!(SAMPLE_CONFIG.contains(from), "fixture does not contain {from:?}");
    SAMPLE_CONFIG.replacen(from, to, 1)
}
