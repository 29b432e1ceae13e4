//! Role catalog backed by the provider-synced store.
//!
//! The identity provider's management API is not called from the request
//! path; an external sync process materializes the role catalog into the
//! `roles` table and this implementation reads it from there.

use service_core::async_trait::async_trait;
use service_core::error::AppError;

use crate::models::CatalogRole;
use crate::services::{Database, RoleCatalog};

#[derive(Clone)]
pub struct DbRoleCatalog {
    db: Database,
}

impl DbRoleCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleCatalog for DbRoleCatalog {
    async fn fetch_roles(&self) -> Result<Vec<CatalogRole>, AppError> {
        self.db.list_catalog_roles().await
    }
}
