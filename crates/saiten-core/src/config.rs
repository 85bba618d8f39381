//! Global configuration for saiten (stored in ~/.config/saiten/config.toml)
//!
//! ```toml
//! [store]
//! dir = "assignments"
//!
//! [gradebook]
//! id_header = "StudentID"
//! grade_header = "Grade"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SaitenError};
use crate::gradebook::GradebookColumns;
use crate::store::io::write_atomic;
use crate::store::paths::DEFAULT_BASE_DIR;

const CONFIG_DIR: &str = "saiten";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "SAITEN_CONFIG_DIR";

/// Where submissions are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_base_dir")]
    pub dir: PathBuf,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: default_base_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaitenConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub gradebook: GradebookColumns,
}

impl SaitenConfig {
    /// Path of the config file, honoring `SAITEN_CONFIG_DIR`
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    SaitenError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the global config; defaults when the file does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path; defaults when the file does not exist.
    ///
    /// A file that exists but does not parse is an error rather than a silent
    /// fallback, since it decides where grades are written.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SaitenError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            SaitenError::Other(format!(
                "failed to parse config from {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| SaitenError::Other("invalid config path".to_string()))?;

        fs::create_dir_all(config_dir).map_err(|e| {
            SaitenError::Other(format!(
                "failed to create config directory {}: {}",
                config_dir.display(),
                e
            ))
        })?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| SaitenError::Other(format!("failed to serialize config: {}", e)))?;

        write_atomic(path, content.as_bytes())
    }

    /// Returns the source description for display purposes
    pub fn source_display() -> String {
        if std::env::var(CONFIG_DIR_ENV_VAR).is_ok() {
            "custom config directory".to_string()
        } else {
            "~/.config/saiten/config.toml".to_string()
        }
    }
}
