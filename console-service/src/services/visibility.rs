//! Role visibility filtering.
//!
//! Two stages: a fixed denylist keeps provider housekeeping roles out of
//! the decision path entirely, then the cache-backed tier check decides
//! whether the caller may see or assign the role.

use crate::models::{CallerIdentity, CatalogRole, Role};
use crate::services::{permissions, RoleAccessCache};

/// Substrings marking provider-internal or machine-to-machine roles. Matched
/// case-insensitively against both role name and description.
const SYSTEM_ROLE_MARKERS: [&str; 5] = [
    "logto",
    "management api",
    "machine-to-machine",
    "m2m",
    "default",
];

/// True when a role is provider housekeeping and must never be exposed,
/// regardless of the caller's tier.
pub fn is_system_role(name: &str, description: &str) -> bool {
    let name = name.to_lowercase();
    let description = description.to_lowercase();
    SYSTEM_ROLE_MARKERS
        .iter()
        .any(|marker| name.contains(marker) || description.contains(marker))
}

/// Whether a functional role may be exposed to or assigned by the caller.
///
/// A role missing from the snapshot is never exposed.
pub fn is_role_visible(cache: &RoleAccessCache, role_id: &str, caller: &CallerIdentity) -> bool {
    let Some(access) = cache.lookup(role_id) else {
        tracing::warn!(
            role_id = role_id,
            "role access control not found in cache, denying access"
        );
        return false;
    };

    if !access.has_access_control {
        return true;
    }

    match access.required_tier {
        Some(required) => permissions::has_tier_permission(&caller.org_role, required),
        // Restricted to a tier nobody holds.
        None => false,
    }
}

/// Filter a catalog listing down to the roles the caller may see.
pub fn filter_visible_roles(
    cache: &RoleAccessCache,
    roles: Vec<CatalogRole>,
    caller: &CallerIdentity,
) -> Vec<Role> {
    roles
        .into_iter()
        .filter(|role| {
            if is_system_role(&role.name, &role.description) {
                tracing::debug!(role_name = %role.name, "role filtered as system role");
                return false;
            }
            true
        })
        .filter(|role| is_role_visible(cache, &role.id, caller))
        .map(Role::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrganizationTier, RoleAccessControl};

    fn caller(org_role: &str) -> CallerIdentity {
        CallerIdentity {
            id: "usr-1".to_string(),
            organization_id: "org-1".to_string(),
            org_role: org_role.to_string(),
            org_permissions: vec![],
            user_roles: vec![],
            user_permissions: vec![],
        }
    }

    fn fixture_cache() -> RoleAccessCache {
        let cache = RoleAccessCache::new();
        cache.refresh(vec![
            ("role-a".to_string(), RoleAccessControl::unrestricted()),
            (
                "role-b".to_string(),
                RoleAccessControl::restricted(OrganizationTier::Distributor),
            ),
        ]);
        cache
    }

    #[test]
    fn system_role_markers_match_name_and_description() {
        assert!(is_system_role("Logto Management API access", ""));
        assert!(is_system_role("bot", "machine-to-machine worker"));
        assert!(is_system_role("M2M connector", ""));
        assert!(is_system_role("default", ""));
        assert!(is_system_role("Support", "the DEFAULT support profile"));
        assert!(!is_system_role("Support Admin", "handles tickets"));
    }

    #[test]
    fn unrestricted_role_is_visible_to_every_tier() {
        let cache = fixture_cache();
        for role in ["owner", "distributor", "reseller", "customer"] {
            assert!(is_role_visible(&cache, "role-a", &caller(role)), "role={role}");
        }
    }

    #[test]
    fn restricted_role_is_visible_down_to_the_required_tier() {
        let cache = fixture_cache();
        assert!(is_role_visible(&cache, "role-b", &caller("owner")));
        assert!(is_role_visible(&cache, "role-b", &caller("distributor")));
        assert!(!is_role_visible(&cache, "role-b", &caller("reseller")));
        assert!(!is_role_visible(&cache, "role-b", &caller("customer")));
    }

    #[test]
    fn unknown_role_is_denied_for_every_tier() {
        let cache = fixture_cache();
        for role in ["owner", "distributor", "reseller", "customer"] {
            assert!(!is_role_visible(&cache, "role-c", &caller(role)), "role={role}");
        }
    }

    #[test]
    fn unrecognized_caller_tier_is_denied_on_restricted_roles() {
        let cache = fixture_cache();
        assert!(is_role_visible(&cache, "role-a", &caller("superadmin")));
        assert!(!is_role_visible(&cache, "role-b", &caller("superadmin")));
    }

    #[test]
    fn restricted_to_unrecognized_tier_denies_even_owners() {
        let cache = RoleAccessCache::new();
        cache.refresh(vec![(
            "weird".to_string(),
            RoleAccessControl {
                has_access_control: true,
                required_tier: None,
            },
        )]);
        assert!(!is_role_visible(&cache, "weird", &caller("owner")));
    }

    #[test]
    fn listing_drops_system_roles_before_the_visibility_decision() {
        let cache = fixture_cache();
        // "Logto sync" never reaches the cache lookup even though it is
        // absent from the snapshot.
        let roles = vec![
            CatalogRole {
                id: "role-a".to_string(),
                name: "Support".to_string(),
                description: "support staff".to_string(),
                required_tier: None,
            },
            CatalogRole {
                id: "role-sys".to_string(),
                name: "Logto sync".to_string(),
                description: String::new(),
                required_tier: None,
            },
            CatalogRole {
                id: "role-b".to_string(),
                name: "Fleet Admin".to_string(),
                description: "manages fleets".to_string(),
                required_tier: Some("distributor".to_string()),
            },
        ];

        let visible = filter_visible_roles(&cache, roles.clone(), &caller("reseller"));
        assert_eq!(
            visible.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["role-a"]
        );

        let visible = filter_visible_roles(&cache, roles, &caller("owner"));
        assert_eq!(
            visible.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["role-a", "role-b"]
        );
    }
}
