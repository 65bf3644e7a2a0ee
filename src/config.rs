//! Configuration module for the datasource
//!
//! Handles loading and parsing connection settings from TOML, with sensible
//! defaults for all optional values.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DatasourceError, Result};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_connect_timeout() -> u64 {
    5
}

/// Connection settings for one Ferrite/Redis server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasourceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// ACL username for AUTH (legacy password-only AUTH when unset)
    pub username: Option<String>,
    /// Password for AUTH; no AUTH is issued when unset
    pub password: Option<String>,
    /// Database index to SELECT after connecting
    pub db: u8,
    /// Connection establishment timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatasourceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            db: 0,
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl DatasourceConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| DatasourceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DatasourceError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Validate settings that cannot be expressed in the type
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(DatasourceError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(DatasourceError::Config("port must not be 0".to_string()));
        }
        if self.connect_timeout == 0 {
            return Err(DatasourceError::Config(
                "connect_timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Connection establishment timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}
