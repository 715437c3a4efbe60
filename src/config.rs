use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
const APP_DIR: &str = "tasklist-tui";
const STORAGE_FILE: &str = "storage.json";
const FALLBACK_STORAGE_FILE: &str = ".tasklist-tui.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub storage: StorageLocation,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("TASKLIST_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into());
        if api_base.trim().is_empty() {
            return Err(ConfigError::Empty("TASKLIST_API_BASE"));
        }

        let ephemeral = lookup("TASKLIST_EPHEMERAL")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let storage = if ephemeral {
            StorageLocation::Memory
        } else {
            let path = lookup("TASKLIST_STORAGE_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_storage_file);
            StorageLocation::File(path)
        };

        let log_file = lookup("TASKLIST_LOG_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base: api_base.trim().to_string(),
            storage,
            log_file,
        })
    }
}

fn default_storage_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(STORAGE_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_FILE))
}
