//! Error handling utilities
//!
//! This module defines the crate-wide error type and its classification helpers.

pub mod error;

// Re-export commonly used types
pub use error::*;
