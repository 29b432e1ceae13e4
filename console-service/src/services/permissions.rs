//! Tier and permission evaluation.
//!
//! Pure comparisons over the organization tier order; no state, no I/O.
//! Everything here fails closed: an unrecognized tier never grants access.

use crate::models::OrganizationTier;

/// True iff `caller` is at least as privileged as `required`.
pub fn tier_satisfies(caller: OrganizationTier, required: OrganizationTier) -> bool {
    caller.rank() <= required.rank()
}

/// True iff the caller's raw role string parses to a tier at least as
/// privileged as `required`. Unrecognized strings always deny.
pub fn has_tier_permission(caller_role: &str, required: OrganizationTier) -> bool {
    match caller_role.parse::<OrganizationTier>() {
        Ok(tier) => tier_satisfies(tier, required),
        Err(_) => false,
    }
}

/// Exact-match membership of `permission` in either permission set.
///
/// Comparison is verbatim and case-sensitive; permission strings are not
/// normalized.
pub fn has_permission(
    user_permissions: &[String],
    org_permissions: &[String],
    permission: &str,
) -> bool {
    user_permissions.iter().any(|p| p == permission)
        || org_permissions.iter().any(|p| p == permission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrganizationTier::*;

    const TIERS: [OrganizationTier; 4] = [Owner, Distributor, Reseller, Customer];

    #[test]
    fn tier_satisfies_matches_rank_order() {
        for caller in TIERS {
            for required in TIERS {
                assert_eq!(
                    tier_satisfies(caller, required),
                    caller.rank() <= required.rank(),
                    "caller={caller} required={required}"
                );
            }
        }
    }

    #[test]
    fn tier_satisfies_is_reflexive() {
        for tier in TIERS {
            assert!(tier_satisfies(tier, tier));
        }
    }

    #[test]
    fn owner_satisfies_everything() {
        for required in TIERS {
            assert!(has_tier_permission("owner", required));
        }
    }

    #[test]
    fn customer_satisfies_only_customer() {
        assert!(has_tier_permission("customer", Customer));
        assert!(!has_tier_permission("customer", Reseller));
        assert!(!has_tier_permission("customer", Distributor));
        assert!(!has_tier_permission("customer", Owner));
    }

    #[test]
    fn unrecognized_caller_role_always_denies() {
        for required in TIERS {
            assert!(!has_tier_permission("superadmin", required));
            assert!(!has_tier_permission("", required));
        }
    }

    #[test]
    fn caller_role_casing_is_normalized() {
        assert!(has_tier_permission("Distributor", Reseller));
        assert!(has_tier_permission("RESELLER", Customer));
        assert!(!has_tier_permission("RESELLER", Distributor));
    }

    #[test]
    fn permission_membership_checks_both_sets() {
        let user = vec!["read:systems".to_string()];
        let org = vec!["manage:users".to_string()];
        assert!(has_permission(&user, &org, "read:systems"));
        assert!(has_permission(&user, &org, "manage:users"));
        assert!(!has_permission(&user, &org, "destroy:systems"));
    }

    #[test]
    fn permission_membership_is_case_sensitive() {
        let org = vec!["Manage:Users".to_string()];
        assert!(!has_permission(&[], &org, "manage:users"));
        assert!(has_permission(&[], &org, "Manage:Users"));
    }

    #[test]
    fn empty_permission_sets_deny() {
        assert!(!has_permission(&[], &[], "anything"));
    }
}
