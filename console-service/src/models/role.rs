//! Functional role models - catalog entries and access-control metadata.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::OrganizationTier;

/// Access-control metadata attached to a functional role.
///
/// `has_access_control == true` with `required_tier == None` marks a role
/// restricted to a tier this service does not recognize; no caller can
/// satisfy it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAccessControl {
    pub has_access_control: bool,
    pub required_tier: Option<OrganizationTier>,
}

impl RoleAccessControl {
    pub fn unrestricted() -> Self {
        Self {
            has_access_control: false,
            required_tier: None,
        }
    }

    pub fn restricted(tier: OrganizationTier) -> Self {
        Self {
            has_access_control: true,
            required_tier: Some(tier),
        }
    }
}

/// One role as yielded by the identity provider's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Declared minimum organization tier, if the role is restricted.
    pub required_tier: Option<String>,
}

/// Role as exposed to console callers.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<CatalogRole> for Role {
    fn from(role: CatalogRole) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}
