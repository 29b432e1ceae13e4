//! Interface to the metrics backend fronted by the gate.
//!
//! Transport lives outside this service. Implementations receive the
//! request with the organization scope header already stamped and the
//! caller credential already removed.

use axum::extract::Request;
use axum::response::Response;
use service_core::async_trait::async_trait;
use service_core::error::AppError;

#[async_trait]
pub trait MetricsUpstream: Send + Sync {
    async fn forward(&self, req: Request) -> Result<Response, AppError>;
}

/// Wired when no metrics backend is configured; every gated request that
/// passes authentication answers 503.
pub struct DisabledUpstream;

#[async_trait]
impl MetricsUpstream for DisabledUpstream {
    async fn forward(&self, _req: Request) -> Result<Response, AppError> {
        tracing::error!("metrics upstream is not configured");
        Err(AppError::ServiceUnavailable)
    }
}
