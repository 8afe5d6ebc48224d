//! Store configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! `StoreConfig::from_env` reads the file named by `SQUAD_CONFIG_PATH`.

use crate::data::DEFAULT_FORMATION_ID;
use serde::{Deserialize, Serialize};
use std::{env, fs};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "SQUAD_CONFIG_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Keys of the three persisted records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub squad: String,
    pub formation: String,
    pub snapshots: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            squad: "fc26-squad".to_string(),
            formation: "fc26-formation".to_string(),
            snapshots: "fc26-snapshots".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Written as `appName` in exports
    pub app_identifier: String,
    /// Written as `version` in exports
    pub schema_version: String,
    /// Formation used when nothing has been persisted yet
    pub default_formation: String,
    pub keys: StorageKeys,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_identifier: "FC26-Builder".to_string(),
            schema_version: "1.0".to_string(),
            default_formation: DEFAULT_FORMATION_ID.to_string(),
            keys: StorageKeys::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the file named by `SQUAD_CONFIG_PATH`; defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded store config from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [&self.keys.squad, &self.keys.formation, &self.keys.snapshots];
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid("storage keys must not be empty".to_string()));
        }
        if keys[0] == keys[1] || keys[0] == keys[2] || keys[1] == keys[2] {
            return Err(ConfigError::Invalid("storage keys must be distinct".to_string()));
        }
        if self.default_formation.trim().is_empty() {
            return Err(ConfigError::Invalid("defaultFormation must not be empty".to_string()));
        }
        if self.app_identifier.trim().is_empty() {
            return Err(ConfigError::Invalid("appIdentifier must not be empty".to_string()));
        }
        Ok(())
    }
}
