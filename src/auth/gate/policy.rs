//! Gate policy: which restrictions a guarded piece of content carries

use crate::auth::rbac::{Composition, PermissionEvaluator, PermissionRequirement};
use crate::auth::types::Actor;
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Restrictions attached to guarded content.
///
/// Empty lists and `false` flags mean "no restriction of that kind".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePolicy {
    /// Permissions the actor must hold
    pub required_permissions: Vec<PermissionRequirement>,
    /// Require every permission instead of any one
    pub require_all_permissions: bool,
    /// Role names admitted by the gate
    pub allowed_roles: Vec<String>,
    /// Require every allowed role instead of any one
    pub require_all_roles: bool,
    /// Admit built-in roles only
    pub is_system_role: bool,
    /// Role names always refused
    pub exclude_roles: Vec<String>,
    /// Render nothing instead of the fallback when refused
    pub hide_on_unauthorized: bool,
}

impl GatePolicy {
    /// Policy with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_permission(
        mut self,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.required_permissions
            .push(PermissionRequirement::new(resource, action));
        self
    }

    pub fn require_all_permissions(mut self) -> Self {
        self.require_all_permissions = true;
        self
    }

    pub fn allow_role(mut self, role_name: impl Into<String>) -> Self {
        self.allowed_roles.push(role_name.into());
        self
    }

    pub fn require_all_roles(mut self) -> Self {
        self.require_all_roles = true;
        self
    }

    pub fn system_role_only(mut self) -> Self {
        self.is_system_role = true;
        self
    }

    pub fn exclude_role(mut self, role_name: impl Into<String>) -> Self {
        self.exclude_roles.push(role_name.into());
        self
    }

    pub fn hide_on_unauthorized(mut self) -> Self {
        self.hide_on_unauthorized = true;
        self
    }

    /// Whether any restriction is configured
    pub fn has_restrictions(&self) -> bool {
        !self.required_permissions.is_empty()
            || !self.allowed_roles.is_empty()
            || self.is_system_role
            || !self.exclude_roles.is_empty()
    }

    /// Check requirements and role names are usable
    pub fn check_well_formed(&self) -> Result<()> {
        for requirement in &self.required_permissions {
            requirement.validate()?;
        }

        let role_names = self.allowed_roles.iter().chain(&self.exclude_roles);
        for name in role_names {
            if name.trim().is_empty() {
                return Err(AccessError::validation("Gate role names cannot be empty"));
            }
        }

        Ok(())
    }

    /// Run the configured checks against an authenticated actor.
    ///
    /// Order: exclusion, allowed roles, system role, permissions. The first
    /// failing check refuses access. Malformed policy or actor data is an error.
    pub fn evaluate(&self, actor: &Actor) -> Result<bool> {
        self.check_well_formed()?;
        actor.validate()?;

        let evaluator = PermissionEvaluator::for_actor(actor);

        if evaluator.is_excluded_role(&self.exclude_roles) {
            debug!("Actor {} refused: role is excluded", actor.id);
            return Ok(false);
        }

        if !self.allowed_roles.is_empty() {
            let composition = Composition::from_require_all(self.require_all_roles);
            if !evaluator.has_roles(&self.allowed_roles, composition) {
                debug!("Actor {} refused: role not allowed", actor.id);
                return Ok(false);
            }
        }

        if self.is_system_role && !evaluator.is_system_role() {
            debug!("Actor {} refused: not a system role", actor.id);
            return Ok(false);
        }

        if !self.required_permissions.is_empty() {
            let composition = Composition::from_require_all(self.require_all_permissions);
            if !evaluator.has_permissions(&self.required_permissions, composition) {
                debug!(
                    "Actor {} refused: missing permissions ({:?} of {})",
                    actor.id,
                    composition,
                    self.required_permissions
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return Ok(false);
            }
        }

        Ok(true)
    }
}
