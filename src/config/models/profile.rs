//! Profile source configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where and how the actor profile is fetched and cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSourceConfig {
    /// Backend base URL, e.g. `https://api.example.com/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the profile endpoint, relative to `base_url`
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    /// Path of the token refresh endpoint, relative to `base_url`
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How long a fetched profile stays cached, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Maximum number of cached profiles
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for ProfileSourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile_path: default_profile_path(),
            refresh_path: default_refresh_path(),
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl ProfileSourceConfig {
    /// Merge profile source configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.profile_path != default_profile_path() {
            self.profile_path = other.profile_path;
        }
        if other.refresh_path != default_refresh_path() {
            self.refresh_path = other.refresh_path;
        }
        if other.timeout_secs != default_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.cache_ttl_secs != default_cache_ttl() {
            self.cache_ttl_secs = other.cache_ttl_secs;
        }
        if other.cache_capacity != default_cache_capacity() {
            self.cache_capacity = other.cache_capacity;
        }
        self
    }
}
