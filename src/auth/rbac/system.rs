//! Per-actor permission evaluator

use crate::auth::types::Actor;

use super::permissions;
use super::roles;
use super::types::{Composition, PermissionCheck, PermissionRequirement, Role};

/// Permission evaluator bound to one actor's role snapshot.
///
/// Construct one per evaluation with [`PermissionEvaluator::for_actor`]; it
/// borrows the role and never outlives the snapshot it was built from.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    role: Option<&'a Role>,
}

impl<'a> PermissionEvaluator<'a> {
    /// Create an evaluator over an optional role
    pub fn new(role: Option<&'a Role>) -> Self {
        Self { role }
    }

    /// Create an evaluator over the actor's role
    pub fn for_actor(actor: &'a Actor) -> Self {
        Self::new(actor.role.as_ref())
    }

    /// Evaluator for an actor with no role
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// The role being evaluated
    pub fn role(&self) -> Option<&'a Role> {
        self.role
    }

    /// Whether the role grants `resource:action`
    pub fn has_permission(&self, resource: &str, action: &str) -> bool {
        permissions::has_permission(self.role, resource, action)
    }

    /// Whether the role grants at least one requirement
    pub fn has_any_permission(&self, requirements: &[PermissionRequirement]) -> bool {
        permissions::has_any_permission(self.role, requirements)
    }

    /// Whether the role grants every requirement
    pub fn has_all_permissions(&self, requirements: &[PermissionRequirement]) -> bool {
        permissions::has_all_permissions(self.role, requirements)
    }

    /// Check requirements under the given composition mode
    pub fn has_permissions(
        &self,
        requirements: &[PermissionRequirement],
        composition: Composition,
    ) -> bool {
        permissions::has_permissions(self.role, requirements, composition)
    }

    /// Check one permission and report how it matched or why it was denied
    pub fn check_permission_detailed(&self, resource: &str, action: &str) -> PermissionCheck {
        permissions::check_permission_detailed(self.role, resource, action)
    }

    /// Whether the role is named `role_name`, ignoring case
    pub fn has_role(&self, role_name: &str) -> bool {
        roles::has_role(self.role, role_name)
    }

    /// Whether the role matches one of the names
    pub fn has_any_role<S: AsRef<str>>(&self, role_names: &[S]) -> bool {
        roles::has_any_role(self.role, role_names)
    }

    /// Whether the role matches every name
    pub fn has_all_roles<S: AsRef<str>>(&self, role_names: &[S]) -> bool {
        roles::has_all_roles(self.role, role_names)
    }

    /// Check role names under the given composition mode
    pub fn has_roles<S: AsRef<str>>(&self, role_names: &[S], composition: Composition) -> bool {
        match composition {
            Composition::Any => self.has_any_role(role_names),
            Composition::All => self.has_all_roles(role_names),
        }
    }

    /// Whether the role is built in
    pub fn is_system_role(&self) -> bool {
        roles::is_system_role(self.role)
    }

    /// Whether the role is in the exclusion list
    pub fn is_excluded_role<S: AsRef<str>>(&self, excluded_names: &[S]) -> bool {
        roles::is_excluded_role(self.role, excluded_names)
    }
}
