//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, EarningsRules, ServerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── earnings.yaml   # Regular-hour and overtime rules
/// └── server.yaml     # Bind address and list defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use earnings_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Monthly overtime threshold: {}", loader.earnings().monthly_overtime_threshold);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if either file is missing, holds invalid YAML, or the pay
    /// rules do not pass [`EarningsRules::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let earnings = Self::load_yaml::<EarningsRules>(&path.join("earnings.yaml"))?;
        earnings.validate()?;

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;
        if server.default_list_limit == 0 {
            return Err(EngineError::InvalidConfig {
                field: "default_list_limit".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            config: AppConfig::new(earnings, server),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the pay rules.
    pub fn earnings(&self) -> &EarningsRules {
        self.config.earnings()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }
}
