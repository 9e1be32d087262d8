//! Role checking functions

use super::helpers::role_names_match;
use super::types::Role;

/// Check if the role is named `role_name`, ignoring case
pub fn has_role(role: Option<&Role>, role_name: &str) -> bool {
    role.is_some_and(|r| role_names_match(&r.name, role_name))
}

/// Check if the role matches any of the names. An empty list never matches.
pub fn has_any_role<S: AsRef<str>>(role: Option<&Role>, role_names: &[S]) -> bool {
    role_names.iter().any(|name| has_role(role, name.as_ref()))
}

/// Check if the role matches every name. An empty list always matches.
pub fn has_all_roles<S: AsRef<str>>(role: Option<&Role>, role_names: &[S]) -> bool {
    role_names.iter().all(|name| has_role(role, name.as_ref()))
}

/// Check if the role is a built-in role
pub fn is_system_role(role: Option<&Role>) -> bool {
    role.is_some_and(|r| r.is_system)
}

/// Check if the role is one of the excluded names
pub fn is_excluded_role<S: AsRef<str>>(role: Option<&Role>, excluded_names: &[S]) -> bool {
    has_any_role(role, excluded_names)
}
