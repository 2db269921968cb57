//! Global settings management
//!
//! Provides persistent user preferences shared by all projects.
//! Settings are stored at `~/.config/sereto/settings.toml` (XDG standard).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paths;

/// Global sereto settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Target categories known to the tool; selecting a target by one of these
    /// names filters by category instead of unique name
    #[serde(default = "default_categories")]
    pub categories: BTreeSet<String>,
}

fn default_categories() -> BTreeSet<String> {
    ["dast", "sast", "mobile", "infrastructure", "cloud", "kubernetes", "wifi", "generic"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

impl Settings {
    /// Load settings from the global location, or defaults if absent
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&paths::settings_file())
    }

    /// Load settings from a file, or defaults if absent or unreadable
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        fs::read_to_string(path)
            .ok()
            .and_then(|content| match toml::from_str(&content) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    log::warn!("ignoring invalid settings file {}: {e}", path.display());
                    None
                },
            })
            .unwrap_or_default()
    }

    /// Save settings to the global location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&paths::settings_file())
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Register an additional category, returns false if already known
    pub fn add_category(&mut self, category: &str) -> bool {
        self.categories.insert(category.to_lowercase())
    }

    /// Check if a category is known, ignoring case
    #[must_use]
    pub fn is_category(&self, name: &str) -> bool {
        self.categories.contains(&name.to_lowercase())
    }
}
