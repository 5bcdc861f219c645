//! Persisted operator settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File holding the operator settings
pub const SETTINGS_FILE: &str = "settings.json";

/// Operator settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Backend origin overriding the configured one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// JSON file persisting [`Settings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            path: base_path.into().join(SETTINGS_FILE),
        }
    }

    /// Load settings; a missing or unreadable file yields the defaults
    pub fn load(&self) -> Settings {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", self.path, e);
                return Settings::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt settings file {:?}: {}", self.path, e);
            Settings::default()
        })
    }

    pub fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
