//! Backend profile payload

use crate::auth::rbac::{PermissionRecord, Role};
use crate::auth::types::Actor;
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};

/// Profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    /// Identifier, string or number depending on the backend
    pub id: serde_json::Value,
    #[serde(default)]
    pub role: Option<RawRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRole {
    pub name: String,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub permissions: Vec<RawPermission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPermission {
    pub resource: String,
    pub action: String,
}

impl TryFrom<RawRole> for Role {
    type Error = AccessError;

    fn try_from(raw: RawRole) -> Result<Self> {
        let role = Role {
            name: raw.name,
            is_system: raw.is_system,
            permissions: raw
                .permissions
                .into_iter()
                .map(|p| PermissionRecord::new(p.resource, p.action))
                .collect(),
        };
        role.validate()?;
        Ok(role)
    }
}

impl TryFrom<RawProfile> for Actor {
    type Error = AccessError;

    fn try_from(raw: RawProfile) -> Result<Self> {
        let id = match raw.id {
            serde_json::Value::String(id) => id,
            serde_json::Value::Number(id) => id.to_string(),
            other => {
                return Err(AccessError::validation(format!(
                    "Profile id must be a string or number, got: {}",
                    other
                )));
            }
        };

        let actor = Actor {
            id,
            role: raw.role.map(Role::try_from).transpose()?,
        };
        actor.validate()?;
        Ok(actor)
    }
}
