//! Application configuration (TOML).
//!
//! ```toml
//! log_level = "info"
//!
//! [database]
//! path = "data/lxd-connector.db"
//!
//! [client]
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//!
//! [connector]
//! profile = "lxdserver"
//! ```
//!
//! Every key has a default; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lxd_connector_client::{
    ClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use lxd_connector_core::error::{CoreError, CoreResult};
use lxd_connector_core::types::ConnectorProfile;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub database: DatabaseConfig,
    pub client: ClientSection,
    pub connector: ConnectorSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` database file, created on first use.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorSection {
    /// Built-in profile id (`lxdserver` or `senkinlxc`).
    pub profile: String,
    /// Overrides the profile's API prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_prefix: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            database: DatabaseConfig::default(),
            client: ClientSection::default(),
            connector: ConnectorSection::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lxd-connector.db"),
        }
    }
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for ConnectorSection {
    fn default() -> Self {
        Self {
            profile: ConnectorProfile::lxd_server().id,
            api_prefix: None,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ValidationError(format!(
                "Failed to read config file at {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&contents).map_err(|e| {
            CoreError::ValidationError(format!("Invalid config file {}: {e}", path.display()))
        })
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        toml::from_str(contents)
            .map_err(|e| CoreError::ValidationError(format!("Failed to parse TOML: {e}")))
    }

    /// Timeouts for the control API client.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.client.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.client.request_timeout_secs),
        }
    }

    /// Resolve the configured connector profile.
    pub fn profile(&self) -> CoreResult<ConnectorProfile> {
        let mut profile = ConnectorProfile::by_id(&self.connector.profile).ok_or_else(|| {
            CoreError::ValidationError(format!(
                "Unknown connector profile: {}",
                self.connector.profile
            ))
        })?;
        if let Some(prefix) = self.connector.api_prefix.as_ref().filter(|p| !p.is_empty()) {
            profile.api_prefix.clone_from(prefix);
        }
        Ok(profile)
    }
}
