//! Organization-scoped system listing.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::Identity;
use crate::models::SystemSummary;
use crate::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ListSystemsQuery {
    pub organization_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SystemsResponse {
    pub systems: Vec<SystemSummary>,
}

/// List the systems of one organization the caller manages.
///
/// GET /api/systems?organization_id=
///
/// Customer callers are always bound to their own organization; every other
/// tier must name a target organization inside its hierarchy.
#[tracing::instrument(skip(state, caller, query), fields(user_id = %caller.0.id, org_role = %caller.0.org_role))]
pub async fn list_systems(
    State(state): State<AppState>,
    caller: Identity,
    Query(query): Query<ListSystemsQuery>,
) -> Result<Json<SystemsResponse>, AppError> {
    let Identity(caller) = caller;

    let target_org = state
        .hierarchy
        .resolve_target_org(&caller, query.organization_id.as_deref())
        .await?;

    let systems = state.db.list_systems_by_organization(&target_org).await?;

    tracing::info!(
        organization_id = %target_org,
        system_count = systems.len(),
        "systems listed"
    );

    Ok(Json(SystemsResponse { systems }))
}
