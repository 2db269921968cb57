//! Centralized path definitions for sereto
//!
//! Single source of truth for every filesystem location sereto reads or writes.
//!
//! ## Storage Layout
//!
//! ### Per-Project
//!
//! ```text
//! PT01234/                                  # Project directory
//! ├── config.json                           # Versioned configuration
//! ├── target_dast_customer_portal/          # One directory per target (uname)
//! │   └── findings.toml                     # Findings of the target
//! └── target_sast_backend/
//!     └── findings.toml
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/sereto/
//! └── settings.toml             # Known target categories
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths
// =============================================================================

/// Configuration filename inside a project directory
pub const CONFIG_FILE: &str = "config.json";

/// Findings filename inside a target directory
pub const FINDINGS_FILE: &str = "findings.toml";

/// Get path to the configuration file of a project.
#[must_use]
pub fn config_file(project: &Path) -> PathBuf {
    project.join(CONFIG_FILE)
}

/// Get the directory of a target inside a project.
#[must_use]
pub fn target_dir(project: &Path, uname: &str) -> PathBuf {
    project.join(uname)
}

/// Find the project directory containing `start`.
///
/// Walks up from `start` and returns the first directory holding a
/// `config.json`.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start.ancestors().find(|dir| config_file(dir).is_file()).map(Path::to_path_buf)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global settings directory name
const GLOBAL_DIR: &str = "sereto";

/// Global settings filename
const SETTINGS_FILE: &str = "settings.toml";

/// Get the global sereto directory.
///
/// Returns `~/.config/sereto/` (platform config dir).
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global settings file path.
#[must_use]
pub fn settings_file() -> PathBuf {
    global_config_dir().join(SETTINGS_FILE)
}
