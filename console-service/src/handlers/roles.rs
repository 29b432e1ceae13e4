//! Role listing filtered by caller visibility.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::middleware::Identity;
use crate::models::Role;
use crate::services::visibility::filter_visible_roles;
use crate::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

/// List the functional roles the caller may see or assign.
///
/// GET /api/roles
#[tracing::instrument(skip(state, caller), fields(user_id = %caller.0.id, org_role = %caller.0.org_role))]
pub async fn list_roles(
    State(state): State<AppState>,
    caller: Identity,
) -> Result<Json<RolesResponse>, AppError> {
    let Identity(caller) = caller;

    let catalog_roles = state.catalog.fetch_roles().await.map_err(|e| {
        tracing::error!(error = %e, "failed to fetch role catalog");
        e
    })?;

    let total_roles = catalog_roles.len();
    let roles = filter_visible_roles(&state.role_cache, catalog_roles, &caller);

    tracing::info!(
        total_roles = total_roles,
        accessible_roles = roles.len(),
        "roles fetched and filtered"
    );

    Ok(Json(RolesResponse { roles }))
}
