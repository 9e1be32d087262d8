//! Error handling for the access layer
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for the access layer
pub type Result<T> = std::result::Result<T, AccessError>;

/// Main error type for the access layer
#[derive(Error, Debug)]
pub enum AccessError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Validation errors (malformed profile or requirement data)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Actor profile could not be fetched
    #[error("Profile fetch error: {0}")]
    ProfileFetch(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an error, used for log routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied bad data or configuration
    ClientError,
    /// The backend or the transport misbehaved
    UpstreamError,
    /// Bug or unexpected local failure
    InternalError,
}

/// Helper functions for creating specific errors
impl AccessError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn profile_fetch<S: Into<String>>(message: S) -> Self {
        Self::ProfileFetch(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            AccessError::Config(_)
            | AccessError::Yaml(_)
            | AccessError::Validation(_)
            | AccessError::Serialization(_) => ErrorCategory::ClientError,
            AccessError::HttpClient(_) | AccessError::ProfileFetch(_) | AccessError::Io(_) => {
                ErrorCategory::UpstreamError
            }
            AccessError::Internal(_) => ErrorCategory::InternalError,
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AccessError::HttpClient(e) => e.is_timeout() || e.is_connect(),
            AccessError::ProfileFetch(_) => true,
            _ => false,
        }
    }
}
