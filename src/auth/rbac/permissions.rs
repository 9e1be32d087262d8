//! Permission checking functions

use super::types::{
    Composition, MatchKind, PermissionCheck, PermissionRecord, PermissionRequirement, Role,
};

/// Find the rule granting `resource:action` to `role`.
///
/// Rules are tried in order: exact match, `resource:*`, then `*:*`. There is
/// no `*:action` form.
pub(super) fn match_permission(
    role: Option<&Role>,
    resource: &str,
    action: &str,
) -> Option<MatchKind> {
    let permissions = &role?.permissions;

    if permissions.iter().any(|p| p.is_exactly(resource, action)) {
        return Some(MatchKind::Exact);
    }

    if permissions.iter().any(|p| p.grants_all_actions_on(resource)) {
        return Some(MatchKind::ActionWildcard);
    }

    if permissions.iter().any(PermissionRecord::is_full_wildcard) {
        return Some(MatchKind::FullWildcard);
    }

    None
}

/// Check if a role grants `action` on `resource`. An absent role grants nothing.
pub fn has_permission(role: Option<&Role>, resource: &str, action: &str) -> bool {
    match_permission(role, resource, action).is_some()
}

/// Check if a role grants at least one of the requirements
pub fn has_any_permission(role: Option<&Role>, requirements: &[PermissionRequirement]) -> bool {
    requirements
        .iter()
        .any(|req| has_permission(role, &req.resource, &req.action))
}

/// Check if a role grants every requirement
pub fn has_all_permissions(role: Option<&Role>, requirements: &[PermissionRequirement]) -> bool {
    requirements
        .iter()
        .all(|req| has_permission(role, &req.resource, &req.action))
}

/// Check requirements under the given composition mode
pub fn has_permissions(
    role: Option<&Role>,
    requirements: &[PermissionRequirement],
    composition: Composition,
) -> bool {
    match composition {
        Composition::Any => has_any_permission(role, requirements),
        Composition::All => has_all_permissions(role, requirements),
    }
}

/// Detailed permission check
pub fn check_permission_detailed(
    role: Option<&Role>,
    resource: &str,
    action: &str,
) -> PermissionCheck {
    match match_permission(role, resource, action) {
        Some(kind) => PermissionCheck {
            granted: true,
            matched_by: Some(kind),
            denial_reason: None,
        },
        None => {
            let reason = match role {
                None => "No role assigned".to_string(),
                Some(role) => format!(
                    "Role '{}' is missing permission: {}:{}",
                    role.name, resource, action
                ),
            };
            PermissionCheck {
                granted: false,
                matched_by: None,
                denial_reason: Some(reason),
            }
        }
    }
}
