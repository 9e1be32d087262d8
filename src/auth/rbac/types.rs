//! RBAC type definitions

use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Matches any resource or any action
pub const WILDCARD: &str = "*";

/// A resource/action grant attached to a role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Protected resource category (e.g. `clients`), or `*`
    pub resource: String,
    /// Operation on the resource (e.g. `read`), or `*`
    pub action: String,
}

impl PermissionRecord {
    /// Create a new permission record
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// The `*:*` record, granting every check
    pub fn full_wildcard() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    /// Whether this record is `*:*`
    pub fn is_full_wildcard(&self) -> bool {
        self.resource == WILDCARD && self.action == WILDCARD
    }

    /// Whether this record grants every action on `resource`
    pub fn grants_all_actions_on(&self, resource: &str) -> bool {
        self.resource == resource && self.action == WILDCARD
    }

    /// Whether this record is exactly `resource:action`
    pub fn is_exactly(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

impl fmt::Display for PermissionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name, compared case-insensitively
    pub name: String,
    /// Whether this is a built-in role
    pub is_system: bool,
    /// Permissions granted by this role
    pub permissions: HashSet<PermissionRecord>,
}

impl Role {
    /// Create a custom role with no permissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_system: false,
            permissions: HashSet::new(),
        }
    }

    /// Create a built-in role with no permissions
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            is_system: true,
            ..Self::new(name)
        }
    }

    /// Add a permission record
    pub fn with_permission(
        mut self,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.permissions.insert(PermissionRecord::new(resource, action));
        self
    }

    /// Add several permission records
    pub fn with_permissions<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = PermissionRecord>,
    {
        self.permissions.extend(records);
        self
    }

    /// Check the role is well formed: a non-blank name and no blank
    /// resource or action on any record.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AccessError::validation("Role name cannot be empty"));
        }

        for record in &self.permissions {
            if record.resource.trim().is_empty() || record.action.trim().is_empty() {
                return Err(AccessError::validation(format!(
                    "Role '{}' has a permission with an empty resource or action: {}",
                    self.name, record
                )));
            }
        }

        Ok(())
    }
}

/// A resource/action pair a caller requires
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRequirement {
    /// Required resource, never a wildcard
    pub resource: String,
    /// Required action, never a wildcard
    pub action: String,
}

impl PermissionRequirement {
    /// Create a new requirement
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Requirements name concrete resources and actions. Blank values and
    /// wildcards are rejected.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("resource", &self.resource), ("action", &self.action)] {
            if value.trim().is_empty() {
                return Err(AccessError::validation(format!(
                    "Permission requirement {} cannot be empty",
                    field
                )));
            }
            if value == WILDCARD {
                return Err(AccessError::validation(format!(
                    "Permission requirement {} cannot be a wildcard: {}",
                    field, self
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PermissionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// How several requirements combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    /// At least one must hold
    #[default]
    Any,
    /// Every one must hold
    All,
}

impl Composition {
    /// Map a `require_all` flag to a composition mode
    pub fn from_require_all(require_all: bool) -> Self {
        if require_all { Self::All } else { Self::Any }
    }
}

/// Which rule granted a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `resource:action`
    Exact,
    /// `resource:*`
    ActionWildcard,
    /// `*:*`
    FullWildcard,
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Rule that granted the permission
    pub matched_by: Option<MatchKind>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}
