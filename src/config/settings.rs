use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockupError, Result};

/// Configuration loaded from `.lockup.toml` in the working directory.
///
/// Every field has a sensible default so Lockup works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the database and the salt file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Database file name inside `data_dir`.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Salt file name inside `data_dir`.
    #[serde(default = "default_salt_file")]
    pub salt_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".lockup".to_string()
}

fn default_database_file() -> String {
    crate::vault::Database::FILE_NAME.to_string()
}

fn default_salt_file() -> String {
    crate::crypto::SaltStore::FILE_NAME.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
            salt_file: default_salt_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".lockup.toml";

    /// Load settings from `<project_dir>/.lockup.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockupError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the data directory against `project_dir`, letting an explicit
    /// override (CLI flag or `LOCKUP_DATA_DIR`) win over the file setting.
    pub fn data_dir(&self, project_dir: &Path, data_dir_override: Option<&str>) -> PathBuf {
        project_dir.join(data_dir_override.unwrap_or(&self.data_dir))
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }

    pub fn salt_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.salt_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
