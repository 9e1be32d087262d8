//! Profile source configuration validators

use super::trait_def::Validate;
use crate::config::models::ProfileSourceConfig;
use tracing::debug;

impl Validate for ProfileSourceConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating profile source configuration");

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        for (name, path) in [
            ("Profile path", &self.profile_path),
            ("Refresh path", &self.refresh_path),
        ] {
            if path.is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
            if !path.starts_with('/') {
                return Err(format!("{} must start with '/': {}", name, path));
            }
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.timeout_secs > 300 {
            return Err("Timeout should not exceed 300 seconds".to_string());
        }

        if self.cache_ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }

        if self.cache_capacity == 0 {
            return Err("Cache capacity must be greater than 0".to_string());
        }

        Ok(())
    }
}
