// Configuration and study preferences, stored as YAML

use crate::persistence::{JsonlProvider, MemoryProvider, PersistenceProvider, SqliteProvider};
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_DIR: &str = "taskdeck";
pub const CONFIG_FILE: &str = "config.yaml";

/// Where tasks are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Jsonl,
    Sqlite,
    Memory,
}

/// Study timer durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub study_minutes: u32,
    pub break_minutes: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl Preferences {
    pub fn validate(&self) -> Result<()> {
        if self.study_minutes == 0 {
            return Err(eyre!("Study duration must be at least one minute"));
        }
        if self.break_minutes == 0 {
            return Err(eyre!("Break duration must be at least one minute"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub backend: Backend,
    pub preferences: Preferences,
}

impl Config {
    /// `<config dir>/taskdeck/config.yaml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `explicit`, or from the default location.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("Config file not found: {:?}", path));
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.preferences.validate()?;

        info!(file = ?path, backend = ?config.backend, "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.preferences.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Configured data directory, falling back to the platform data dir
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".taskdeck"))
    }

    /// Open the configured persistence backend
    pub fn open_provider(&self) -> Result<Box<dyn PersistenceProvider>> {
        let provider: Box<dyn PersistenceProvider> = match self.backend {
            Backend::Jsonl => Box::new(JsonlProvider::open(self.data_dir())?),
            Backend::Sqlite => Box::new(SqliteProvider::open(self.data_dir())?),
            Backend::Memory => Box::new(MemoryProvider::new()),
        };
        Ok(provider)
    }
}
