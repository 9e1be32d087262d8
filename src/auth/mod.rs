//! Authentication and authorization
//!
//! - `rbac`: pure permission and role evaluation
//! - `profile`: fetching and validating the actor profile
//! - `session`: per-session profile state
//! - `gate`: tri-state authorization decisions for guarded content

pub mod gate;
pub mod profile;
pub mod rbac;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use gate::{AccessDecision, AuthorizationGate, GatePolicy, GateView};
pub use profile::{
    HttpProfileSource, ProfileCache, ProfileSource, RawProfile, SessionTokens,
    StaticProfileSource,
};
pub use rbac::{
    Composition, PermissionEvaluator, PermissionRecord, PermissionRequirement, Role, WILDCARD,
};
pub use session::{ProfileState, SessionContext};
pub use types::Actor;
