//! # clinic-access
//!
//! Permission evaluation and authorization gating for the clinic admin
//! dashboard.
//!
//! ## Features
//!
//! - **Wildcard permissions**: `resource:action` grants with `resource:*` and `*:*`
//! - **Role checks**: case-insensitive role names, exclusion lists, system roles
//! - **Authorization gates**: tri-state decisions (pending, authorized, unauthorized)
//! - **Profile sources**: backend profile fetch with token refresh and caching
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinic_access::{
//!     AuthorizationGate, Config, ProfileCache, SessionContext, StaticProfileSource,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/access.yaml").await?;
//!     let source = StaticProfileSource::from_file("profile.json").await?;
//!     let session = SessionContext::new(
//!         "session",
//!         Arc::new(source),
//!         ProfileCache::from_config(config.profile()),
//!     );
//!
//!     let gate: AuthorizationGate = AuthorizationGate::new(config.gate("clients.delete")?.clone());
//!     println!("{}", gate.resolve(&session).await);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod utils;

// Re-export main types
pub use auth::rbac::{
    check_permission_detailed, has_all_permissions, has_all_roles, has_any_permission,
    has_any_role, has_permission, has_permissions, has_role, is_excluded_role, is_system_role,
};
pub use auth::{
    AccessDecision, Actor, AuthorizationGate, Composition, GatePolicy, GateView,
    HttpProfileSource, PermissionEvaluator, PermissionRecord, PermissionRequirement,
    ProfileCache, ProfileSource, ProfileState, RawProfile, Role, SessionContext, SessionTokens,
    StaticProfileSource, WILDCARD,
};
pub use config::Config;
pub use utils::error::{AccessError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information, stamped by the build script
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}, built {} with {})",
            NAME, self.version, self.git_hash, self.build_time, self.rust_version
        )
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
