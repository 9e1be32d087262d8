//! Configuration management
//!
//! This module handles loading, validation, and merging of configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::auth::gate::GatePolicy;
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable names read by [`Config::from_env`]
pub mod env_keys {
    pub const BASE_URL: &str = "ACCESS_PROFILE_BASE_URL";
    pub const PROFILE_PATH: &str = "ACCESS_PROFILE_PATH";
    pub const REFRESH_PATH: &str = "ACCESS_REFRESH_PATH";
    pub const TIMEOUT_SECS: &str = "ACCESS_TIMEOUT_SECS";
    pub const CACHE_TTL_SECS: &str = "ACCESS_CACHE_TTL_SECS";
    pub const CACHE_CAPACITY: &str = "ACCESS_CACHE_CAPACITY";
    pub const LOG_LEVEL: &str = "ACCESS_LOG_LEVEL";
    pub const LOG_JSON: &str = "ACCESS_LOG_JSON";
}

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Profile source configuration
    #[serde(default)]
    pub profile: ProfileSourceConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Named gate policies
    #[serde(default)]
    pub gates: BTreeMap<String, GatePolicy>,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AccessError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(env_keys::BASE_URL) {
            config.profile.base_url = base_url;
        }
        if let Some(path) = lookup(env_keys::PROFILE_PATH) {
            config.profile.profile_path = path;
        }
        if let Some(path) = lookup(env_keys::REFRESH_PATH) {
            config.profile.refresh_path = path;
        }
        if let Some(value) = lookup(env_keys::TIMEOUT_SECS) {
            config.profile.timeout_secs = parse_number(env_keys::TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(env_keys::CACHE_TTL_SECS) {
            config.profile.cache_ttl_secs = parse_number(env_keys::CACHE_TTL_SECS, &value)?;
        }
        if let Some(value) = lookup(env_keys::CACHE_CAPACITY) {
            config.profile.cache_capacity = parse_number(env_keys::CACHE_CAPACITY, &value)?;
        }
        if let Some(level) = lookup(env_keys::LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(value) = lookup(env_keys::LOG_JSON) {
            config.logging.json = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Get profile source configuration
    pub fn profile(&self) -> &ProfileSourceConfig {
        &self.profile
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Look up a named gate policy
    pub fn gate(&self, name: &str) -> Result<&GatePolicy> {
        self.gates
            .get(name)
            .ok_or_else(|| AccessError::Config(format!("Unknown gate: {}", name)))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.profile
            .validate()
            .map_err(|e| AccessError::Config(format!("Profile config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| AccessError::Config(format!("Logging config error: {}", e)))?;

        for (name, policy) in &self.gates {
            policy
                .validate()
                .map_err(|e| AccessError::Config(format!("Gate '{}' config error: {}", name, e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.profile = self.profile.merge(other.profile);
        self.logging = self.logging.merge(other.logging);
        self.gates.extend(other.gates);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| AccessError::Config(format!("Invalid value for {}: '{}' ({})", key, value, e)))
}
