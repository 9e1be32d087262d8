//! Helper functions for RBAC operations

/// Case-insensitive role name comparison
pub(super) fn role_names_match(role_name: &str, wanted: &str) -> bool {
    role_name == wanted || role_name.to_lowercase() == wanted.to_lowercase()
}
