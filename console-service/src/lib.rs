pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::State,
    middleware::from_fn,
    routing::{any, get},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use service_core::error::AppError;
use service_core::middleware::{
    request_id::request_id_middleware, security_headers::security_headers_middleware,
};

use crate::config::ConsoleConfig;
use crate::services::{
    Database, HierarchyService, MetricsUpstream, RoleAccessCache, RoleCatalog, SystemAuthService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: ConsoleConfig,
    pub db: Database,
    pub role_cache: RoleAccessCache,
    pub hierarchy: HierarchyService,
    pub system_auth: SystemAuthService,
    pub catalog: Arc<dyn RoleCatalog>,
    pub upstream: Arc<dyn MetricsUpstream>,
}

pub fn build_router(state: AppState) -> Router {
    // Human routes: the decoded caller identity must be present.
    let authenticated = Router::new()
        .route("/api/roles", get(handlers::roles::list_roles))
        .route("/api/systems", get(handlers::systems::list_systems))
        .layer(from_fn(middleware::caller_identity_middleware));

    Router::new()
        .route("/health", get(health_check))
        // Machine route: gated by the system credential alone.
        .route("/api/metrics/*path", any(handlers::metrics::proxy_metrics))
        .merge(authenticated)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

/// Service health check
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "checks": {
            "postgres": "up",
            "role_cache": if state.role_cache.is_loaded() { "loaded" } else { "empty" }
        }
    })))
}
