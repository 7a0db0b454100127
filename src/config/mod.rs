mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use std::path::Path;

/// Connection settings that can come from the environment or the command line
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub studio_url: Option<String>,
    pub store_url: Option<String>,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Apply environment/CLI connection settings on top of the file values
    pub fn apply_connection(&mut self, overrides: ConnectionOverrides) {
        let conn = &mut self.connection;
        if overrides.studio_url.is_some() {
            conn.studio_url = overrides.studio_url;
        }
        if overrides.store_url.is_some() {
            conn.store_url = overrides.store_url;
        }
        if overrides.api_key.is_some() {
            conn.api_key = overrides.api_key;
        }
        if overrides.project_id.is_some() {
            conn.project_id = overrides.project_id;
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.studio_url.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingConnection("studio_url"));
        }
        if self.connection.store_url.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingConnection("store_url"));
        }
        if self.party.size == 0 {
            return Err(ConfigError::InvalidParty("party size must be at least 1".to_string()));
        }
        if self.party.classes.is_empty() {
            return Err(ConfigError::InvalidParty("no party classes configured".to_string()));
        }
        Ok(())
    }
}
