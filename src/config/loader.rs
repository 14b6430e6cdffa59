//! Configuration Loader
//!
//! Handles loading the endpoint configuration from builtin defaults and the
//! file system.

use crate::config::endpoint::EndpointConfig;
use crate::error::{AgentryError, Result};
use std::path::{Path, PathBuf};

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: EndpointConfig,
}

impl ConfigLoader {
    /// Create a new config loader and load from default locations
    pub fn new() -> Result<Self> {
        let mut loader = Self {
            config: Self::builtin_defaults()?,
        };

        // File system config overrides the built-ins
        loader.load_from_default_paths()?;

        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            config: Self::builtin_defaults()?,
        };

        loader.load_from_file(path)?;

        Ok(loader)
    }

    /// Load built-in endpoint defaults
    fn builtin_defaults() -> Result<EndpointConfig> {
        let defaults = include_str!("../../agentry.json");
        serde_json::from_str(defaults).map_err(|e| {
            AgentryError::Config(format!("Failed to parse built-in agentry.json: {}", e))
        })
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        for path in Self::get_config_paths() {
            if path.exists() {
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Get list of config paths to check
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Environment variable
        if let Ok(custom_path) = std::env::var("AGENTRY_CONFIG_PATH") {
            paths.push(PathBuf::from(custom_path));
        }

        // 2. Current directory
        paths.push(PathBuf::from("agentry.json"));

        // 3. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("agentry").join("agentry.json"));
        }

        // 4. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".agentry").join("agentry.json"));
        }

        paths
    }

    /// Load configuration from a specific file (replaces the current endpoint)
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentryError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.config = serde_json::from_str(&content).map_err(|e| {
            AgentryError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> EndpointConfig {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config: EndpointConfig::default(),
        })
    }
}
