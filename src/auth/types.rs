//! Authentication and authorization types

use crate::auth::rbac::Role;
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};

/// The authenticated identity whose access is evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Opaque identifier assigned by the backend
    pub id: String,
    /// Assigned role, if any. Role-less actors hold no permissions.
    pub role: Option<Role>,
}

impl Actor {
    /// Create an actor without a role
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
        }
    }

    /// Attach a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// The actor's role
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Check the actor is well formed
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AccessError::validation("Actor id cannot be empty"));
        }
        match &self.role {
            Some(role) => role.validate(),
            None => Ok(()),
        }
    }
}
