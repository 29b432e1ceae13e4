//! Caller identity and the organization tier order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Organization tier in the management hierarchy.
///
/// Totally ordered by privilege: an `Owner` organization manages everything,
/// a `Customer` organization only itself. Declaration order matches the
/// privilege order, so the derived `Ord` agrees with [`OrganizationTier::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationTier {
    Owner,
    Distributor,
    Reseller,
    Customer,
}

impl OrganizationTier {
    /// Fixed privilege rank; a lower number is a more privileged tier.
    pub fn rank(self) -> u8 {
        match self {
            OrganizationTier::Owner => 1,
            OrganizationTier::Distributor => 2,
            OrganizationTier::Reseller => 3,
            OrganizationTier::Customer => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrganizationTier::Owner => "owner",
            OrganizationTier::Distributor => "distributor",
            OrganizationTier::Reseller => "reseller",
            OrganizationTier::Customer => "customer",
        }
    }
}

impl fmt::Display for OrganizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external role string did not name one of the four tiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized organization tier: {0}")]
pub struct UnknownTierError(pub String);

impl FromStr for OrganizationTier {
    type Err = UnknownTierError;

    /// Case-insensitive parse; this is the single place external tier
    /// strings are normalized. Anything else is unrecognized, never coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(OrganizationTier::Owner),
            "distributor" => Ok(OrganizationTier::Distributor),
            "reseller" => Ok(OrganizationTier::Reseller),
            "customer" => Ok(OrganizationTier::Customer),
            _ => Err(UnknownTierError(s.to_string())),
        }
    }
}

/// Decoded caller identity, produced by the upstream authentication layer.
///
/// Immutable for the duration of a request; carried as a request extension
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub id: String,
    pub organization_id: String,
    /// Raw organization role string as issued by the identity provider;
    /// parsed into [`OrganizationTier`] on use.
    pub org_role: String,
    #[serde(default)]
    pub org_permissions: Vec<String>,
    #[serde(default)]
    pub user_roles: Vec<String>,
    #[serde(default)]
    pub user_permissions: Vec<String>,
}

impl CallerIdentity {
    pub fn tier(&self) -> Result<OrganizationTier, UnknownTierError> {
        self.org_role.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("owner".parse::<OrganizationTier>(), Ok(OrganizationTier::Owner));
        assert_eq!("Owner".parse::<OrganizationTier>(), Ok(OrganizationTier::Owner));
        assert_eq!(
            "DISTRIBUTOR".parse::<OrganizationTier>(),
            Ok(OrganizationTier::Distributor)
        );
        assert_eq!(
            "Reseller".parse::<OrganizationTier>(),
            Ok(OrganizationTier::Reseller)
        );
        assert_eq!(
            "customer".parse::<OrganizationTier>(),
            Ok(OrganizationTier::Customer)
        );
    }

    #[test]
    fn unknown_tier_is_rejected() {
        assert!("superadmin".parse::<OrganizationTier>().is_err());
        assert!("".parse::<OrganizationTier>().is_err());
        assert!("owner ".parse::<OrganizationTier>().is_err());
    }

    #[test]
    fn rank_order_matches_privilege() {
        assert!(OrganizationTier::Owner.rank() < OrganizationTier::Distributor.rank());
        assert!(OrganizationTier::Distributor.rank() < OrganizationTier::Reseller.rank());
        assert!(OrganizationTier::Reseller.rank() < OrganizationTier::Customer.rank());
        assert!(OrganizationTier::Owner < OrganizationTier::Customer);
    }

    #[test]
    fn identity_deserializes_with_missing_permission_lists() {
        let identity: CallerIdentity = serde_json::from_str(
            r#"{"id":"usr-1","organization_id":"org-1","org_role":"reseller"}"#,
        )
        .unwrap();
        assert_eq!(identity.tier(), Ok(OrganizationTier::Reseller));
        assert!(identity.org_permissions.is_empty());
        assert!(identity.user_permissions.is_empty());
    }
}
