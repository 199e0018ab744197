//! Configuration management for calcom-mcp
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.calcom-mcp/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::errors::{ServerError, Result};
use crate::tools::adapter::default_adapter_path;

/// Environment variable overriding the adapter location
pub const ADAPTER_PATH_ENV: &str = "CAL_ADAPTER_PATH";

/// Complete configuration for calcom-mcp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub adapter: AdapterConfig,
    pub logging: LoggingConfig,
}

/// MCP server identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub instructions: Option<String>,
}

/// Adapter binary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Explicit adapter path; next to the executable when unset
    pub path: Option<PathBuf>,

    /// Credential the adapter expects in its environment
    pub credential_env: String,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Cal.com API v2".to_string(),
            instructions: Some(
                "Lists Cal.com bookings. Results are the raw JSON returned by the Cal.com v2 API."
                    .to_string(),
            ),
        }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            path: None,
            credential_env: "CAL_API_KEY".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServerError::ConfigError(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| ServerError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.calcom-mcp/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".calcom-mcp").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(ServerError::ConfigError(
                "server.name must not be empty".to_string()
            ));
        }

        if let Some(path) = &self.adapter.path {
            if path.as_os_str().is_empty() {
                return Err(ServerError::ConfigError(
                    "adapter.path must not be empty when set".to_string()
                ));
            }
        }

        if self.adapter.credential_env.trim().is_empty() {
            return Err(ServerError::ConfigError(
                "adapter.credential_env must not be empty".to_string()
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(ServerError::ConfigError(
                format!("Invalid log level: {}", self.logging.level)
            )),
        }

        Ok(())
    }

    /// Resolve the adapter binary location
    ///
    /// `override_path` comes from `--adapter` or `CAL_ADAPTER_PATH`; it wins
    /// over the config file, which wins over the executable's directory.
    pub fn adapter_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(Self::expand_path(path));
        }

        if let Some(path) = &self.adapter.path {
            return Ok(Self::expand_path(path));
        }

        default_adapter_path()
    }

    /// Expand a leading `~/` to the home directory
    pub fn expand_path(path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix("~") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        path.to_path_buf()
    }
}
