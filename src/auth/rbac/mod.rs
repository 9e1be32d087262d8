//! Role-Based Access Control (RBAC) evaluation
//!
//! Pure permission and role decisions over an actor's role. Nothing in this
//! module performs I/O or holds mutable state.

mod helpers;
mod permissions;
mod roles;
mod system;
mod types;

// Re-export public types and functions
pub use permissions::{
    check_permission_detailed, has_all_permissions, has_any_permission, has_permission,
    has_permissions,
};
pub use roles::{has_all_roles, has_any_role, has_role, is_excluded_role, is_system_role};
pub use system::PermissionEvaluator;
pub use types::{
    Composition, MatchKind, PermissionCheck, PermissionRecord, PermissionRequirement, Role,
    WILDCARD,
};
