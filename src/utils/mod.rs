//! Utility modules
//!
//! - **error**: Error types and the crate-wide `Result` alias
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{AccessError, ErrorCategory, Result};
pub use logging::init_logging;

/// Truncate string to at most `max_len` characters, ending with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
