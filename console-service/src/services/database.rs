//! PostgreSQL store access for the console backend.
//!
//! Read-only queries behind the authorization kernel: credential lookup,
//! hierarchy reachability probes, and the provider-synced role catalog.
//! The tables are maintained by the external sync process; this service
//! never writes them.

use service_core::error::AppError;
use sqlx::postgres::PgPool;

use crate::models::{CatalogRole, SystemCredential, SystemSummary};

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
            })?;
        Ok(())
    }

    // ==================== System credentials ====================

    /// Find an authenticatable credential row by its public secret part.
    ///
    /// Soft-deleted and suspended rows are never eligible.
    pub async fn find_system_credential(
        &self,
        secret_public: &str,
    ) -> Result<Option<SystemCredential>, AppError> {
        sqlx::query_as::<_, SystemCredential>(
            r#"
            SELECT id, system_key, secret_public, secret_hash, organization_id,
                   deleted_at, suspended_at
            FROM systems
            WHERE secret_public = $1
              AND deleted_at IS NULL
              AND suspended_at IS NULL
            "#,
        )
        .bind(secret_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    /// List non-deleted systems belonging to one organization.
    pub async fn list_systems_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<SystemSummary>, AppError> {
        sqlx::query_as::<_, SystemSummary>(
            r#"
            SELECT id, system_key, organization_id, suspended_at
            FROM systems
            WHERE organization_id = $1
              AND deleted_at IS NULL
            ORDER BY system_key
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    // ==================== Hierarchy probes ====================

    /// True when `target_org_id` is an active reseller organization created
    /// by `creator_org_id`.
    pub async fn reseller_created_by(
        &self,
        target_org_id: &str,
        creator_org_id: &str,
    ) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM resellers
            WHERE organization_id = $1 AND created_by = $2 AND active = TRUE
            "#,
        )
        .bind(target_org_id)
        .bind(creator_org_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(count > 0)
    }

    /// True when `target_org_id` is an active customer organization created
    /// by `creator_org_id`.
    pub async fn customer_created_by(
        &self,
        target_org_id: &str,
        creator_org_id: &str,
    ) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE organization_id = $1 AND created_by = $2 AND active = TRUE
            "#,
        )
        .bind(target_org_id)
        .bind(creator_org_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(count > 0)
    }

    /// True when `target_org_id` is an active customer organization created
    /// by a reseller that `creator_org_id` created. This is the only
    /// two-level edge in the hierarchy; no deeper chain is traversed.
    pub async fn customer_of_managed_reseller(
        &self,
        target_org_id: &str,
        creator_org_id: &str,
    ) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers c
            JOIN resellers r ON c.created_by = r.organization_id
            WHERE c.organization_id = $1
              AND r.created_by = $2
              AND c.active = TRUE
              AND r.active = TRUE
            "#,
        )
        .bind(target_org_id)
        .bind(creator_org_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(count > 0)
    }

    // ==================== Role catalog ====================

    /// Load the provider-synced role catalog.
    pub async fn list_catalog_roles(&self) -> Result<Vec<CatalogRole>, AppError> {
        sqlx::query_as::<_, CatalogRole>(
            r#"
            SELECT id, name, description, required_tier
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }
}
