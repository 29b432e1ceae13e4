//! Role access-control snapshot cache.
//!
//! Holds an immutable map of role id to access-control metadata, replaced
//! wholesale on refresh. Lookups clone the current snapshot handle under a
//! read lock and never observe a partially built map; a lookup miss means
//! "unknown role" and resolves to deny at the call sites.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use service_core::async_trait::async_trait;
use service_core::error::AppError;

use crate::models::{CatalogRole, OrganizationTier, RoleAccessControl};

/// Pull interface for the identity provider's role catalog.
#[async_trait]
pub trait RoleCatalog: Send + Sync {
    async fn fetch_roles(&self) -> Result<Vec<CatalogRole>, AppError>;
}

type Snapshot = Arc<HashMap<String, RoleAccessControl>>;

/// Process-wide role access-control snapshot.
///
/// Cloning shares the underlying holder; handlers and the refresh task see
/// the same snapshot.
#[derive(Clone, Default)]
pub struct RoleAccessCache {
    snapshot: Arc<RwLock<Option<Snapshot>>>,
}

impl RoleAccessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot in one swap. The map is built before the
    /// write lock is taken, so readers only ever wait for the swap itself.
    pub fn refresh(&self, entries: impl IntoIterator<Item = (String, RoleAccessControl)>) {
        let next: Snapshot = Arc::new(entries.into_iter().collect());
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(next);
    }

    /// Look up a role's access control. `None` means the role is unknown to
    /// the current snapshot (including the never-loaded state).
    pub fn lookup(&self, role_id: &str) -> Option<RoleAccessControl> {
        let snapshot = {
            let guard = match self.snapshot.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.clone()
        };
        snapshot.and_then(|map| map.get(role_id).cloned())
    }

    /// True once a refresh has installed a snapshot.
    pub fn is_loaded(&self) -> bool {
        let guard = match self.snapshot.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.is_some()
    }

    pub fn len(&self) -> usize {
        let guard = match self.snapshot.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pull the role catalog and swap in a freshly derived snapshot.
    ///
    /// The declared tier string is parsed here, at the boundary: a role with
    /// no declared tier is unrestricted; a role declaring a tier this
    /// service does not recognize stays restricted but unsatisfiable. On
    /// catalog failure the previous snapshot stays live.
    pub async fn refresh_from_catalog(
        &self,
        catalog: &dyn RoleCatalog,
    ) -> Result<usize, AppError> {
        let roles = catalog.fetch_roles().await?;
        let count = roles.len();

        let entries = roles.into_iter().map(|role| {
            let access = match role.required_tier.as_deref() {
                None => RoleAccessControl::unrestricted(),
                Some(raw) => match raw.parse::<OrganizationTier>() {
                    Ok(tier) => RoleAccessControl::restricted(tier),
                    Err(_) => {
                        tracing::warn!(
                            role_id = %role.id,
                            declared_tier = %raw,
                            "role declares an unrecognized required tier; no caller will satisfy it"
                        );
                        RoleAccessControl {
                            has_access_control: true,
                            required_tier: None,
                        }
                    }
                },
            };
            (role.id, access)
        });

        self.refresh(entries);
        tracing::info!(role_count = count, "role access cache refreshed");
        Ok(count)
    }
}
