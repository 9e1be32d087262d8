//! Configuration data models
//!
//! This module defines the configuration structures used throughout the crate.

#![allow(missing_docs)]

pub mod logging;
pub mod profile;

// Re-export all configuration types
pub use logging::*;
pub use profile::*;

/// Default backend base URL
pub fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

/// Default profile endpoint path
pub fn default_profile_path() -> String {
    "/auth/profile".to_string()
}

/// Default token refresh endpoint path
pub fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default profile cache time-to-live in seconds
pub fn default_cache_ttl() -> u64 {
    300
}

/// Default maximum number of cached profiles
pub fn default_cache_capacity() -> u64 {
    1000
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
