use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;

use console_service::{
    build_router,
    config::ConsoleConfig,
    services::{
        Database, DbRoleCatalog, DisabledUpstream, HierarchyService, RoleAccessCache,
        SystemAuthService,
    },
    AppState,
};
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = ConsoleConfig::from_env()?;

    init_tracing(&config.service_name, &config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting console service"
    );

    // The pool connects lazily; the health endpoint surfaces a dead store.
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.database.url)
        .map_err(|e| {
            service_core::error::AppError::ConfigError(anyhow::anyhow!(
                "invalid DATABASE_URL: {}",
                e
            ))
        })?;
    let db = Database::new(pool);
    tracing::info!("Database pool initialized");

    let role_cache = RoleAccessCache::new();
    let catalog = Arc::new(DbRoleCatalog::new(db.clone()));

    // Startup load. A failure is not fatal: an empty snapshot denies every
    // restricted role until the first successful refresh.
    match role_cache.refresh_from_catalog(catalog.as_ref()).await {
        Ok(count) => tracing::info!(role_count = count, "Role access cache loaded"),
        Err(e) => tracing::warn!(
            error = %e,
            "Role access cache load failed; starting with an empty snapshot"
        ),
    }

    // Periodic refresh; the cache itself owns no background work.
    let refresh_cache = role_cache.clone();
    let refresh_catalog = catalog.clone();
    let refresh_interval = config.role_cache.refresh_interval_seconds;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(refresh_interval));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            if let Err(e) = refresh_cache
                .refresh_from_catalog(refresh_catalog.as_ref())
                .await
            {
                tracing::warn!(error = %e, "Periodic role cache refresh failed");
            }
        }
    });

    let state = AppState {
        config: config.clone(),
        db: db.clone(),
        role_cache,
        hierarchy: HierarchyService::new(db.clone()),
        system_auth: SystemAuthService::new(db),
        catalog,
        upstream: Arc::new(DisabledUpstream),
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
